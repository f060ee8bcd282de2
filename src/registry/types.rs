use crate::character::skills::Skill;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

fn default_target_count() -> u32 {
    1
}

/// What a combat-usable item does when used mid-fight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemEffect {
    DamageEnemy { min: i32, max: i32 },
    BuffPlayer { skill: Skill, amount: i32 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermanentEffect {
    #[serde(default)]
    pub max_hp_increase: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDef {
    /// Sell price in silver
    pub value: i32,
    #[serde(default)]
    pub edible: bool,
    #[serde(default)]
    pub heal_min: i32,
    #[serde(default)]
    pub heal_max: i32,
    #[serde(default)]
    pub combat_usable: bool,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    #[serde(default = "default_true")]
    pub spawnable: bool,
    #[serde(default)]
    pub permanent_effect: Option<PermanentEffect>,
    /// Quest items cannot be sold
    #[serde(default)]
    pub quest_item: bool,
}

impl ItemDef {
    /// Usable in combat only when flagged and carrying an effect.
    pub fn combat_effect(&self) -> Option<ItemEffect> {
        if self.combat_usable {
            self.effect
        } else {
            None
        }
    }

    pub fn max_hp_increase(&self) -> i32 {
        self.permanent_effect.map_or(0, |e| e.max_hp_increase)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DropEntry {
    pub item: String,
    /// Percent chance (0-100), rolled independently per entry
    pub chance: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnemyDef {
    pub hp: i32,
    pub attack: i32,
    #[serde(default)]
    pub drops: Vec<DropEntry>,
    /// Inclusive `[min, max]` silver range
    #[serde(default)]
    pub silver_drop: (i32, i32),
}

/// Completion condition of a quest, one variant per quest type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestObjective {
    DefeatEnemies {
        target_enemy: String,
        #[serde(default = "default_target_count")]
        target_count: u32,
    },
    GatherItems {
        target_item: String,
        #[serde(default = "default_target_count")]
        target_count: u32,
    },
    ItemFind {
        target_item: String,
    },
    ReachLocation {
        target_location: String,
    },
}

impl QuestObjective {
    /// Counter-based objectives track a count toward `target_count`.
    pub fn target_count(&self) -> Option<u32> {
        match self {
            QuestObjective::DefeatEnemies { target_count, .. }
            | QuestObjective::GatherItems { target_count, .. } => Some(*target_count),
            QuestObjective::ItemFind { .. } | QuestObjective::ReachLocation { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestRewards {
    #[serde(default)]
    pub reward_hp: Option<i32>,
    #[serde(default)]
    pub reward_silver: Option<i32>,
    #[serde(default)]
    pub reward_skill: BTreeMap<Skill, i32>,
    #[serde(default)]
    pub reward_item: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestDef {
    #[serde(flatten)]
    pub objective: QuestObjective,
    pub description: String,
    #[serde(flatten)]
    pub rewards: QuestRewards,
}
