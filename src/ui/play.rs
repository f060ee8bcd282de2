//! The interactive session loop.

use super::combat::ConsoleDriver;
use super::console::Console;
use super::render::{completion_text, location_text, save_line, status_text};
use crate::character::player::Player;
use crate::character::save::SaveManager;
use crate::core::constants::{DEFAULT_PLAYER_NAME, INN_REST_COST, INN_SUB_LOCATION, SHRINE_SUB_LOCATION};
use crate::core::session::Game;
use crate::errors::GameError;
use crate::quests::available_quests;
use crate::registry::Registry;
use log::info;
use rand::Rng;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Take,
    Fight,
    Enter,
    Leave,
    Rest,
    Meditate,
    Move,
    Status,
    Eat,
    Sell,
    Quests,
    Save,
    Quit,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Take => "Take an item",
            Action::Fight => "Fight an enemy",
            Action::Enter => "Enter a building",
            Action::Leave => "Step outside",
            Action::Rest => "Rest at the inn",
            Action::Meditate => "Meditate at the shrine",
            Action::Move => "Move to a new area",
            Action::Status => "View Status",
            Action::Eat => "Eat an item",
            Action::Sell => "Sell an item",
            Action::Quests => "View Quests",
            Action::Save => "Save Game",
            Action::Quit => "Quit Game",
        }
    }
}

/// Actions that make sense where the player currently stands.
pub fn available_actions(game: &Game<'_>) -> Vec<Action> {
    let mut actions = Vec::new();
    match game.player().current_sub_location.as_deref() {
        Some(place) => {
            if place == INN_SUB_LOCATION {
                actions.push(Action::Rest);
            }
            if place == SHRINE_SUB_LOCATION {
                actions.push(Action::Meditate);
            }
            actions.push(Action::Leave);
        }
        None => {
            let location = game.location();
            if !location.items.is_empty() {
                actions.push(Action::Take);
            }
            if !location.enemies.is_empty() {
                actions.push(Action::Fight);
            }
            if location.is_safe_zone() {
                actions.push(Action::Enter);
            }
            actions.push(Action::Move);
        }
    }
    actions.extend([
        Action::Status,
        Action::Eat,
        Action::Sell,
        Action::Quests,
        Action::Save,
        Action::Quit,
    ]);
    actions
}

/// Runs one adventure from the title menu until the player quits, falls, or input ends.
pub fn play<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &Registry,
    saves: &SaveManager,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let Some(player) = choose_player(console, saves)? else {
        console.say("Farewell!")?;
        return Ok(());
    };

    let mut game = Game::new(registry, player);
    console.say(&format!("Welcome, {}! Your journey begins...", game.player().name))?;
    report_quests(console, &mut game)?;
    if game.is_over() {
        console.say("Game Over")?;
        return Ok(());
    }
    explore(console, &mut game, rng)?;

    loop {
        if game.is_over() {
            console.say("!!! You have fallen !!!")?;
            console.say("Game Over")?;
            return Ok(());
        }

        console.say("")?;
        console.say(&location_text(game.location()))?;
        let actions = available_actions(&game);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let title = format!("What will {} do?", game.player().name);
        let Some(choice) = console.select(&title, &labels)? else {
            console.say("Farewell, Adventurer!")?;
            return Ok(());
        };

        let result = match actions[choice] {
            Action::Take => take(console, &mut game),
            Action::Fight => fight(console, &mut game, rng),
            Action::Enter => enter(console, &mut game),
            Action::Leave => game.leave().map(|place| format!("You leave the {}.", place)),
            Action::Rest => game.rest_at_inn().map(|healed| {
                format!(
                    "You pay {} silver and sleep soundly, restoring {} HP.",
                    INN_REST_COST, healed
                )
            }),
            Action::Meditate => game
                .meditate_at_shrine()
                .map(|()| "A calm clarity settles over you.".to_string()),
            Action::Move => {
                explore(console, &mut game, rng)?;
                Ok(String::new())
            }
            Action::Status => Ok(status_text(game.player(), registry)),
            Action::Eat => eat(console, &mut game, rng),
            Action::Sell => sell(console, &mut game),
            Action::Quests => quest_board(console, &mut game),
            Action::Save => {
                save(console, &game, saves)?;
                Ok(String::new())
            }
            Action::Quit => {
                console.say("Farewell, Adventurer!")?;
                return Ok(());
            }
        };

        match result {
            Ok(message) if !message.is_empty() => console.say(&message)?,
            Ok(_) => {}
            Err(GameError::Io(e)) => return Err(e),
            Err(e) => console.say(&e.to_string())?,
        }
        report_quests(console, &mut game)?;
    }
}

fn choose_player<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    saves: &SaveManager,
) -> io::Result<Option<Player>> {
    loop {
        match console.select("Welcome to Project Aorte!", &["New Game", "Load Game"])? {
            Some(0) => {
                let name = console
                    .prompt(&format!("Enter your name ({}):", DEFAULT_PLAYER_NAME))?
                    .unwrap_or_default();
                return Ok(Some(Player::new(&name)));
            }
            Some(_) => {
                if let Some(player) = load(console, saves)? {
                    return Ok(Some(player));
                }
            }
            None => return Ok(None),
        }
    }
}

fn load<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    saves: &SaveManager,
) -> io::Result<Option<Player>> {
    let listing = match saves.list() {
        Ok(listing) => listing,
        Err(e) => {
            console.say(&format!("Could not list saves: {}", e))?;
            return Ok(None);
        }
    };
    let readable: Vec<_> = listing.into_iter().filter(|s| !s.is_corrupted).collect();
    if readable.is_empty() {
        console.say("No save files found.")?;
        return Ok(None);
    }

    let lines: Vec<String> = readable.iter().map(save_line).collect();
    let Some(idx) = console.select("Load Game", &lines)? else {
        return Ok(None);
    };
    match saves.load(&readable[idx].slot) {
        Ok(player) => Ok(Some(player)),
        Err(e) => {
            console.say(&format!("Error loading save file {}: {}", readable[idx].slot, e))?;
            Ok(None)
        }
    }
}

fn save<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &Game<'_>,
    saves: &SaveManager,
) -> io::Result<()> {
    let Some(slot) = console.prompt("Enter save file name:")? else {
        return Ok(());
    };
    match saves.save(game.player(), &slot) {
        Ok(path) => console.say(&format!("Game saved to {}", path.display())),
        Err(e) => console.say(&format!("Could not save: {}", e)),
    }
}

fn explore<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let report = match game.explore(rng) {
        Ok(report) => report,
        Err(e) => return console.say(&e.to_string()),
    };
    info!("Exploring {}", report.location);
    report_quests(console, game)?;
    if report.quest_offer {
        console.say("A traveller approaches with news of work.")?;
        match quest_board(console, game) {
            Ok(message) if !message.is_empty() => console.say(&message)?,
            Ok(_) => {}
            Err(GameError::Io(e)) => return Err(e),
            Err(e) => console.say(&e.to_string())?,
        }
    }
    Ok(())
}

fn take<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
) -> Result<String, GameError> {
    let items = game.location().items.clone();
    let Some(idx) = console.select("Take which item?", &items)? else {
        return Ok(String::new());
    };
    game.take_item(&items[idx])?;
    Ok(format!("You picked up: {}", items[idx]))
}

fn fight<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
    rng: &mut impl Rng,
) -> Result<String, GameError> {
    let enemies = game.location().enemies.clone();
    let Some(idx) = console.select("Fight which enemy?", &enemies)? else {
        return Ok(String::new());
    };
    console.say(&format!("A {} attacks!", enemies[idx]))?;
    let mut driver = ConsoleDriver::new(console);
    let report = game.fight(&enemies[idx], rng, &mut driver)?;
    Ok(format!("Combat over: {}", report.outcome))
}

fn enter<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
) -> Result<String, GameError> {
    let places = game.location().sub_locations.clone();
    let Some(idx) = console.select("Go where?", &places)? else {
        return Ok(String::new());
    };
    game.enter(&places[idx])?;
    Ok(format!("You step into the {}.", places[idx]))
}

fn eat<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
    rng: &mut impl Rng,
) -> Result<String, GameError> {
    let edible = game.player().edible_items(game.registry());
    if edible.is_empty() {
        return Ok("You have no edible items.".to_string());
    }
    let Some(idx) = console.select("Eat an Item", &edible)? else {
        return Ok(String::new());
    };
    let healed = game.eat(&edible[idx], rng)?;
    Ok(format!("You ate {} and restored {} HP!", edible[idx], healed))
}

fn sell<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
) -> Result<String, GameError> {
    let mut items: Vec<String> = Vec::new();
    for item in &game.player().inventory {
        if !items.contains(item) {
            items.push(item.clone());
        }
    }
    if items.is_empty() {
        return Ok("You have nothing to sell.".to_string());
    }
    let Some(idx) = console.select("Sell an Item", &items)? else {
        return Ok(String::new());
    };
    let silver = game.sell(&items[idx])?;
    Ok(format!("You sold {} for {} silver.", items[idx], silver))
}

fn quest_board<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
) -> Result<String, GameError> {
    let offers: Vec<(String, String)> = available_quests(game.registry(), game.player())
        .into_iter()
        .map(|(id, quest)| (id.to_string(), quest.description.clone()))
        .collect();
    if offers.is_empty() {
        return Ok("No new quests available.".to_string());
    }
    let lines: Vec<String> = offers
        .iter()
        .map(|(id, description)| format!("{}: {}", id, description))
        .collect();
    let Some(idx) = console.select("Available Quests", &lines)? else {
        return Ok(String::new());
    };
    game.accept_quest(&offers[idx].0)?;
    Ok(format!("Quest accepted: {}", offers[idx].0))
}

fn report_quests<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    game: &mut Game<'_>,
) -> io::Result<()> {
    for completion in game.drain_completions() {
        console.say(&completion_text(&completion))?;
    }
    Ok(())
}
