use super::console::Console;
use super::render::{encounter_header, event_text};
use crate::combat::{CombatAction, CombatDriver, Encounter, TurnResult};
use log::warn;
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 3] = ["Attack", "Use Item", "Flee"];

/// Asks the player for each combat action on the console.
pub struct ConsoleDriver<'c, R, W> {
    console: &'c mut Console<R, W>,
}

impl<'c, R: BufRead, W: Write> ConsoleDriver<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>) -> Self {
        Self { console }
    }

    fn ask(&mut self, encounter: &Encounter<'_>) -> io::Result<CombatAction> {
        self.console.say(&encounter_header(encounter))?;
        let action = match self.console.select("Combat", &ACTIONS)? {
            Some(1) => {
                let items = encounter.usable_items();
                if items.is_empty() {
                    CombatAction::UseItem(None)
                } else {
                    let choice = self.console.select("Use which item?", &items)?;
                    CombatAction::UseItem(choice.map(|i| items[i].clone()))
                }
            }
            Some(2) => CombatAction::Flee,
            // cancelled or out of input
            _ => CombatAction::Attack,
        };
        Ok(action)
    }
}

impl<R: BufRead, W: Write> CombatDriver for ConsoleDriver<'_, R, W> {
    fn choose_action(&mut self, encounter: &Encounter<'_>) -> CombatAction {
        self.ask(encounter).unwrap_or_else(|e| {
            warn!("Console error during combat: {}", e);
            CombatAction::Attack
        })
    }

    fn on_turn(&mut self, encounter: &Encounter<'_>, turn: &TurnResult) {
        for event in &turn.events {
            if let Err(e) = self.console.say(&event_text(event, &encounter.enemy().name)) {
                warn!("Console error during combat: {}", e);
            }
        }
    }
}
