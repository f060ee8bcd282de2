use super::buffs::BuffLedger;
use super::math::{attack_damage, dodges, enemy_damage, flee_threshold, insight_threshold, passes};
use super::types::{CombatAction, CombatEvent, CombatOutcome, Enemy, TurnResult};
use crate::character::player::Player;
use crate::character::skills::Skill;
use crate::core::constants::{
    ATTACK_DIE_MAX, ATTACK_DIE_MIN, ENEMY_DAMAGE_VARIANCE_MAX, ENEMY_DAMAGE_VARIANCE_MIN,
};
use crate::core::dice::Dice;
use crate::errors::CombatError;
use crate::registry::{ItemEffect, Registry};
use log::{debug, warn};

/// One fight between the player and a single enemy.
///
/// The encounter holds the player mutably for its whole lifetime. Temporary buffs are
/// reverted as soon as the fight ends, and again on drop, so an encounter abandoned
/// mid-fight (or unwound by a panic) still leaves the player's skills untouched.
pub struct Encounter<'a> {
    player: &'a mut Player,
    registry: &'a Registry,
    enemy: Enemy,
    buffs: BuffLedger,
    insight_ready: bool,
    outcome: Option<CombatOutcome>,
    turns: u32,
}

impl<'a> Encounter<'a> {
    /// Starts a fight against `enemy_name` and rolls the opening insight check.
    ///
    /// A shrine blessing (`has_wisdom_buff`) makes the check succeed without a roll and is
    /// used up.
    pub fn begin(
        player: &'a mut Player,
        registry: &'a Registry,
        enemy_name: &str,
        dice: &mut impl Dice,
    ) -> Result<Self, CombatError> {
        if let Some(place) = &player.current_sub_location {
            return Err(CombatError::InSafeZone(place.clone()));
        }
        let def = registry
            .enemy(enemy_name)
            .ok_or_else(|| CombatError::UnknownEnemy(enemy_name.to_string()))?;
        let enemy = Enemy::from_def(enemy_name, def);

        let insight_ready = if player.has_wisdom_buff {
            player.has_wisdom_buff = false;
            debug!("Shrine blessing grants insight against {}", enemy_name);
            true
        } else {
            let roll = dice.percent();
            let threshold = insight_threshold(player.skills.get(Skill::Wisdom));
            debug!("Insight roll {} vs {}", roll, threshold);
            passes(roll, threshold)
        };

        Ok(Self {
            player,
            registry,
            enemy,
            buffs: BuffLedger::new(),
            insight_ready,
            outcome: None,
            turns: 0,
        })
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn player(&self) -> &Player {
        &*self.player
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// True while an unused insight bonus is waiting for the next attack.
    pub fn insight_ready(&self) -> bool {
        self.insight_ready
    }

    pub fn buffs(&self) -> &BuffLedger {
        &self.buffs
    }

    /// Turns that were actually consumed.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Distinct combat-usable items the player can pick from.
    pub fn usable_items(&self) -> Vec<String> {
        self.player.combat_items(self.registry)
    }

    /// Resolves one player action and, if the fight goes on, the enemy's reply.
    pub fn apply_action(
        &mut self,
        action: CombatAction,
        dice: &mut impl Dice,
    ) -> Result<TurnResult, CombatError> {
        if self.outcome.is_some() {
            return Err(CombatError::EncounterOver);
        }

        let mut turn = TurnResult::default();

        match action {
            CombatAction::Attack => self.attack(dice, &mut turn),
            CombatAction::UseItem(choice) => {
                if !self.use_item(choice, dice, &mut turn) {
                    return Ok(turn);
                }
            }
            CombatAction::Flee => {
                let roll = dice.percent();
                let threshold = flee_threshold(self.player.skills.get(Skill::Agility));
                debug!("Flee roll {} vs {}", roll, threshold);
                if passes(roll, threshold) {
                    turn.consumed = true;
                    self.turns += 1;
                    turn.events.push(CombatEvent::Fled);
                    self.finish(CombatOutcome::Fled, &mut turn);
                    return Ok(turn);
                }
                turn.events.push(CombatEvent::FleeFailed);
            }
        }

        turn.consumed = true;
        self.turns += 1;

        if !self.enemy.is_alive() {
            self.award_victory(dice, &mut turn);
            self.finish(CombatOutcome::Victory, &mut turn);
            return Ok(turn);
        }

        self.enemy_reply(dice, &mut turn);
        if self.player.is_defeated() {
            turn.events.push(CombatEvent::PlayerDefeated);
            self.finish(CombatOutcome::Defeat, &mut turn);
        }
        Ok(turn)
    }

    fn attack(&mut self, dice: &mut impl Dice, turn: &mut TurnResult) {
        let insight = if self.insight_ready {
            self.insight_ready = false;
            Some(self.player.skills.get(Skill::Wisdom))
        } else {
            None
        };
        let roll = dice.roll(ATTACK_DIE_MIN, ATTACK_DIE_MAX);
        let damage = attack_damage(self.player.skills.get(Skill::Strength), roll, insight);
        self.enemy.take_damage(damage);
        turn.events.push(CombatEvent::PlayerAttack {
            damage,
            insight: insight.is_some(),
        });
    }

    /// Returns false when nothing was used and the turn is not consumed.
    fn use_item(
        &mut self,
        choice: Option<String>,
        dice: &mut impl Dice,
        turn: &mut TurnResult,
    ) -> bool {
        let usable = self.usable_items();
        if usable.is_empty() {
            turn.events.push(CombatEvent::NoUsableItems);
            return false;
        }
        let Some(item) = choice.filter(|c| usable.contains(c)) else {
            turn.events.push(CombatEvent::ItemDeclined);
            return false;
        };
        let Some(effect) = self.registry.item(&item).and_then(|def| def.combat_effect()) else {
            turn.events.push(CombatEvent::ItemDeclined);
            return false;
        };

        self.player.remove_item(&item);
        match effect {
            ItemEffect::DamageEnemy { min, max } => {
                let damage = dice.roll(min, max);
                self.enemy.take_damage(damage);
                turn.events.push(CombatEvent::ItemDamage { item, damage });
            }
            ItemEffect::BuffPlayer { skill, amount } => {
                self.buffs.apply(&mut self.player.skills, skill, amount);
                turn.events.push(CombatEvent::Buffed {
                    item,
                    skill,
                    amount,
                });
            }
        }
        true
    }

    fn enemy_reply(&mut self, dice: &mut impl Dice, turn: &mut TurnResult) {
        let roll = dice.percent();
        if dodges(roll, self.player.skills.get(Skill::Agility)) {
            turn.events.push(CombatEvent::Dodged);
            return;
        }
        let variance = dice.roll(ENEMY_DAMAGE_VARIANCE_MIN, ENEMY_DAMAGE_VARIANCE_MAX);
        let damage = enemy_damage(self.enemy.attack, variance);
        self.player.take_damage(damage);
        turn.events.push(CombatEvent::EnemyAttack { damage });
    }

    /// Silver and each drop-table entry are rolled independently.
    fn award_victory(&mut self, dice: &mut impl Dice, turn: &mut TurnResult) {
        let (min, max) = self.enemy.silver_drop;
        let silver = dice.roll(min, max);
        self.player.add_silver(silver);

        let mut items = Vec::new();
        for entry in &self.enemy.drops {
            if !passes(dice.percent(), entry.chance) {
                continue;
            }
            if self.registry.item(&entry.item).is_none() {
                warn!("{} dropped unknown item {}; skipping", self.enemy.name, entry.item);
                continue;
            }
            self.player.add_item(&entry.item);
            items.push(entry.item.clone());
        }

        self.player.record_kill(&self.enemy.name);
        turn.events.push(CombatEvent::EnemyDefeated {
            enemy: self.enemy.name.clone(),
            silver,
            items,
        });
    }

    fn finish(&mut self, outcome: CombatOutcome, turn: &mut TurnResult) {
        self.outcome = Some(outcome);
        self.insight_ready = false;
        self.buffs.revert(&mut self.player.skills);
        turn.outcome = Some(outcome);
        debug!(
            "Encounter with {} ended: {} after {} turns",
            self.enemy.name, outcome, self.turns
        );
    }
}

impl Drop for Encounter<'_> {
    fn drop(&mut self) {
        self.buffs.revert(&mut self.player.skills);
    }
}

/// Supplies actions for a fight driven by `run_encounter` and observes each turn.
pub trait CombatDriver {
    fn choose_action(&mut self, encounter: &Encounter<'_>) -> CombatAction;

    fn on_turn(&mut self, _encounter: &Encounter<'_>, _turn: &TurnResult) {}
}

impl<F> CombatDriver for F
where
    F: FnMut(&Encounter<'_>) -> CombatAction,
{
    fn choose_action(&mut self, encounter: &Encounter<'_>) -> CombatAction {
        self(encounter)
    }
}

/// Runs the turn loop until the encounter ends. Returns the outcome and every event in order.
pub fn run_encounter(
    encounter: &mut Encounter<'_>,
    dice: &mut impl Dice,
    driver: &mut impl CombatDriver,
) -> (CombatOutcome, Vec<CombatEvent>) {
    let mut events = Vec::new();
    loop {
        if let Some(outcome) = encounter.outcome() {
            return (outcome, events);
        }
        let action = driver.choose_action(encounter);
        match encounter.apply_action(action, dice) {
            Ok(turn) => {
                driver.on_turn(encounter, &turn);
                events.extend(turn.events);
            }
            Err(CombatError::EncounterOver) => {}
            Err(e) => {
                // apply_action only fails once the encounter is over
                warn!("Unexpected combat error: {}", e);
            }
        }
    }
}
