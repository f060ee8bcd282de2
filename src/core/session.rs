//! One running adventure: the player, where they stand, and the actions they can take.

use super::constants::{INN_REST_COST, INN_SUB_LOCATION, QUEST_OFFER_CHANCE, SHRINE_SUB_LOCATION};
use super::dice::Dice;
use crate::character::player::Player;
use crate::combat::{run_encounter, CombatDriver, CombatEvent, CombatOutcome, Encounter};
use crate::errors::GameError;
use crate::quests::{accept_quest, available_quests, QuestCompletion, QuestTracker};
use crate::registry::Registry;
use crate::world::{describe, generate_location, Location};
use log::info;
use rand::Rng;

/// What happened when the player moved on.
#[derive(Debug, Clone)]
pub struct ExploreReport {
    pub location: String,
    /// The quest board should be offered to the player
    pub quest_offer: bool,
}

#[derive(Debug, Clone)]
pub struct FightReport {
    pub outcome: CombatOutcome,
    pub events: Vec<CombatEvent>,
}

pub struct Game<'r> {
    registry: &'r Registry,
    player: Player,
    location: Location,
    completions: Vec<QuestCompletion>,
    over: bool,
}

impl<'r> Game<'r> {
    /// Starts (or resumes) play with `player` standing in their recorded location.
    pub fn new(registry: &'r Registry, player: Player) -> Self {
        let sub_locations = if player.in_safe_zone() {
            vec![INN_SUB_LOCATION.to_string(), SHRINE_SUB_LOCATION.to_string()]
        } else {
            Vec::new()
        };
        let location = Location {
            name: player.location.clone(),
            description: describe(&player.location),
            items: Vec::new(),
            enemies: Vec::new(),
            sub_locations,
        };
        let over = player.is_defeated();
        let mut game = Self {
            registry,
            player,
            location,
            completions: Vec::new(),
            over,
        };
        game.settle_quests();
        game
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn into_player(self) -> Player {
        self.player
    }

    /// Quest completions since the last call, in completion order.
    pub fn drain_completions(&mut self) -> Vec<QuestCompletion> {
        std::mem::take(&mut self.completions)
    }

    pub fn explore(&mut self, rng: &mut impl Rng) -> Result<ExploreReport, GameError> {
        self.ensure_alive()?;
        self.location = generate_location(self.registry, rng);
        self.player.move_to(&self.location.name);
        info!("Arrived at {}", self.location.name);
        self.settle_quests();

        let quest_offer = rng.gen_bool(QUEST_OFFER_CHANCE)
            && !available_quests(self.registry, &self.player).is_empty();
        Ok(ExploreReport {
            location: self.location.name.clone(),
            quest_offer,
        })
    }

    pub fn take_item(&mut self, item: &str) -> Result<(), GameError> {
        self.ensure_alive()?;
        if !self.location.take_item(item) {
            return Err(GameError::NotHere(item.to_string()));
        }
        self.player.pick_up(item);
        self.settle_quests();
        Ok(())
    }

    /// Fights one enemy present at the location until the encounter ends.
    ///
    /// A defeated enemy leaves the location; one the player fled from stays.
    pub fn fight(
        &mut self,
        enemy: &str,
        dice: &mut impl Dice,
        driver: &mut impl CombatDriver,
    ) -> Result<FightReport, GameError> {
        self.ensure_alive()?;
        if !self.location.has_enemy(enemy) {
            return Err(GameError::NotHere(enemy.to_string()));
        }

        let (outcome, events) = {
            let mut encounter = Encounter::begin(&mut self.player, self.registry, enemy, dice)?;
            run_encounter(&mut encounter, dice, driver)
        };

        match outcome {
            CombatOutcome::Victory => {
                self.location.remove_enemy(enemy);
            }
            CombatOutcome::Defeat => {
                info!("{} has fallen to a {}", self.player.name, enemy);
                self.over = true;
            }
            CombatOutcome::Fled => {}
        }
        self.settle_quests();
        Ok(FightReport { outcome, events })
    }

    /// Eats one unit of an edible item. Returns the HP restored.
    pub fn eat(&mut self, item: &str, dice: &mut impl Dice) -> Result<i32, GameError> {
        self.ensure_alive()?;
        let healed = self.player.eat(item, self.registry, dice)?;
        self.settle_quests();
        Ok(healed)
    }

    /// Sells one unit of an item. Returns the silver received.
    pub fn sell(&mut self, item: &str) -> Result<i32, GameError> {
        self.ensure_alive()?;
        let silver = self.player.sell(item, self.registry)?;
        self.settle_quests();
        Ok(silver)
    }

    pub fn accept_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        self.ensure_alive()?;
        accept_quest(self.registry, &mut self.player, quest_id)?;
        self.settle_quests();
        Ok(())
    }

    pub fn enter(&mut self, place: &str) -> Result<(), GameError> {
        self.ensure_alive()?;
        if let Some(current) = &self.player.current_sub_location {
            return Err(GameError::AlreadyInside(current.clone()));
        }
        if !self.location.has_sub_location(place) {
            return Err(GameError::NoSuchPlace(place.to_string()));
        }
        self.player.enter_sub_location(place);
        Ok(())
    }

    /// Steps back out into the location. Returns the place left.
    pub fn leave(&mut self) -> Result<String, GameError> {
        self.ensure_alive()?;
        self.player
            .leave_sub_location()
            .ok_or(GameError::NotInSafeZone)
    }

    /// Pays for a room and restores HP to full. Returns the HP restored.
    pub fn rest_at_inn(&mut self) -> Result<i32, GameError> {
        self.ensure_alive()?;
        self.ensure_inside(INN_SUB_LOCATION)?;
        self.player.spend_silver(INN_REST_COST)?;
        let healed = self.player.heal(self.player.max_hp);
        self.settle_quests();
        Ok(healed)
    }

    /// Grants the shrine blessing: guaranteed insight at the start of the next fight.
    pub fn meditate_at_shrine(&mut self) -> Result<(), GameError> {
        self.ensure_alive()?;
        self.ensure_inside(SHRINE_SUB_LOCATION)?;
        self.player.has_wisdom_buff = true;
        Ok(())
    }

    fn ensure_alive(&self) -> Result<(), GameError> {
        if self.over {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn ensure_inside(&self, place: &str) -> Result<(), GameError> {
        match &self.player.current_sub_location {
            Some(current) if current == place => Ok(()),
            _ => Err(GameError::NotHere(place.to_string())),
        }
    }

    fn settle_quests(&mut self) {
        let done = QuestTracker::new(self.registry).evaluate(&mut self.player);
        self.completions.extend(done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatAction;
    use crate::core::dice::ScriptedDice;
    use crate::errors::PlayerError;
    use crate::registry::load_from_str;

    fn registry() -> Registry {
        load_from_str(
            r#"{"Herb": {"value": 2, "edible": true, "heal_min": 3, "heal_max": 3}}"#,
            r#"{"Rat": {"hp": 2, "attack": 1}}"#,
            r#"{"Herbalist": {"type": "gather_items", "target_item": "Herb",
                              "target_count": 1, "description": "Pick a herb",
                              "reward_silver": 4}}"#,
        )
        .unwrap()
    }

    fn place(game: &mut Game<'_>, location: Location) {
        game.player.move_to(&location.name);
        game.location = location;
    }

    fn hamlet() -> Location {
        Location {
            name: "Silent Hamlet".into(),
            description: String::new(),
            items: vec![],
            enemies: vec![],
            sub_locations: vec![INN_SUB_LOCATION.into(), SHRINE_SUB_LOCATION.into()],
        }
    }

    #[test]
    fn test_take_item_runs_tracker() {
        let registry = registry();
        let mut game = Game::new(&registry, Player::new("Ayla"));
        game.accept_quest("Herbalist").unwrap();
        place(
            &mut game,
            Location {
                name: "Ancient Grove".into(),
                description: String::new(),
                items: vec!["Herb".into()],
                enemies: vec![],
                sub_locations: vec![],
            },
        );

        assert!(matches!(game.take_item("Torch"), Err(GameError::NotHere(_))));
        game.take_item("Herb").unwrap();
        let done = game.drain_completions();
        assert_eq!(done.len(), 1);
        assert_eq!(game.player().silver, 4);
        assert!(!game.player().has_item("Herb"));
        assert!(game.location().items.is_empty());
    }

    #[test]
    fn test_fight_victory_removes_enemy() {
        let registry = registry();
        let mut game = Game::new(&registry, Player::new("Ayla"));
        place(
            &mut game,
            Location {
                name: "Forgotten Cavern".into(),
                description: String::new(),
                items: vec![],
                enemies: vec!["Rat".into()],
                sub_locations: vec![],
            },
        );
        // insight miss, attack die 1 (3 + 1 >= 2 hp), silver roll
        let mut dice = ScriptedDice::new([100, 1, 0]);
        let mut driver = |_: &Encounter<'_>| CombatAction::Attack;
        let report = game.fight("Rat", &mut dice, &mut driver).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Victory);
        assert!(game.location().enemies.is_empty());
        assert_eq!(game.player().kills("Rat"), 1);
        assert!(matches!(
            game.fight("Rat", &mut dice, &mut driver),
            Err(GameError::NotHere(_))
        ));
    }

    #[test]
    fn test_safe_zone_services() {
        let registry = registry();
        let mut game = Game::new(&registry, Player::new("Ayla"));
        place(&mut game, hamlet());

        assert!(matches!(game.rest_at_inn(), Err(GameError::NotHere(_))));
        assert!(matches!(game.enter("Forge"), Err(GameError::NoSuchPlace(_))));
        game.enter(INN_SUB_LOCATION).unwrap();
        assert!(matches!(game.enter(SHRINE_SUB_LOCATION), Err(GameError::AlreadyInside(_))));

        game.player.hp = 40;
        assert!(matches!(
            game.rest_at_inn(),
            Err(GameError::Player(PlayerError::InsufficientSilver { .. }))
        ));
        assert_eq!(game.player().hp, 40);

        game.player.add_silver(15);
        assert_eq!(game.rest_at_inn().unwrap(), 60);
        assert_eq!(game.player().silver, 5);

        assert_eq!(game.leave().unwrap(), INN_SUB_LOCATION);
        game.enter(SHRINE_SUB_LOCATION).unwrap();
        game.meditate_at_shrine().unwrap();
        assert!(game.player().has_wisdom_buff);
        game.leave().unwrap();
        assert!(matches!(game.leave(), Err(GameError::NotInSafeZone)));
    }

    #[test]
    fn test_defeat_ends_game() {
        let registry = registry();
        let mut player = Player::new("Ayla");
        player.hp = 0;
        let mut game = Game::new(&registry, player);
        assert!(game.is_over());
        assert!(matches!(game.sell("Herb"), Err(GameError::GameOver)));
    }
}
