use crate::character::skills::Skill;
use crate::registry::{DropEntry, EnemyDef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A live enemy, instantiated from its definition for one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    /// Drops below zero on overkill
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub drops: Vec<DropEntry>,
    pub silver_drop: (i32, i32),
}

impl Enemy {
    pub fn from_def(name: &str, def: &EnemyDef) -> Self {
        Self {
            name: name.to_string(),
            hp: def.hp,
            max_hp: def.hp,
            attack: def.attack,
            drops: def.drops.clone(),
            silver_drop: def.silver_drop,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount.max(0));
    }

    /// HP for display, never below zero.
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

/// What the player does on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    /// Use one unit of the named item; `None` means the player backed out of the selection.
    UseItem(Option<String>),
    Flee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatOutcome::Victory => f.write_str("Victory"),
            CombatOutcome::Defeat => f.write_str("Defeat"),
            CombatOutcome::Fled => f.write_str("Fled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: i32,
        /// The insight bonus was spent on this attack
        insight: bool,
    },
    ItemDamage {
        item: String,
        damage: i32,
    },
    Buffed {
        item: String,
        skill: Skill,
        amount: i32,
    },
    /// Use Item chosen with nothing usable in the pack
    NoUsableItems,
    /// Use Item chosen but the selection was cancelled
    ItemDeclined,
    FleeFailed,
    Fled,
    Dodged,
    EnemyAttack {
        damage: i32,
    },
    EnemyDefeated {
        enemy: String,
        silver: i32,
        items: Vec<String>,
    },
    PlayerDefeated,
}

/// Everything that happened during one call to `apply_action`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnResult {
    pub events: Vec<CombatEvent>,
    /// False when the action was a no-op (no usable item, declined selection)
    pub consumed: bool,
    /// Set when the encounter ended on this turn
    pub outcome: Option<CombatOutcome>,
}

impl TurnResult {
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_from_def() {
        let def = EnemyDef {
            hp: 10,
            attack: 3,
            drops: vec![],
            silver_drop: (1, 2),
        };
        let mut enemy = Enemy::from_def("Goblin", &def);
        assert_eq!(enemy.max_hp, 10);
        assert!(enemy.is_alive());

        enemy.take_damage(11);
        assert_eq!(enemy.hp, -1);
        assert_eq!(enemy.display_hp(), 0);
        assert!(!enemy.is_alive());

        enemy.take_damage(i32::MAX);
        enemy.take_damage(i32::MAX);
        assert_eq!(enemy.hp, i32::MIN);
    }
}
