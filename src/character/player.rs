use super::skills::{Skill, Skills};
use crate::core::constants::{BASE_MAX_HP, DEFAULT_PLAYER_NAME, STARTING_LOCATION, STARTING_SILVER};
use crate::core::dice::Dice;
use crate::errors::PlayerError;
use crate::registry::Registry;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

fn default_hp() -> i32 {
    BASE_MAX_HP
}

fn default_location() -> String {
    STARTING_LOCATION.to_string()
}

/// The player aggregate: everything that is persisted between sessions.
///
/// Every field has a serde default so saves from older schemas load with the documented
/// baseline values instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_hp")]
    pub hp: i32,
    #[serde(default = "default_hp")]
    pub max_hp: i32,
    #[serde(default)]
    pub silver: i32,
    /// Item names in acquisition order, duplicates allowed
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default = "default_location")]
    pub location: String,
    /// Set while inside a safe zone's sub-location (inn, shrine)
    #[serde(default)]
    pub current_sub_location: Option<String>,
    /// Active quest ids in acceptance order
    #[serde(default)]
    pub current_quests: Vec<String>,
    #[serde(default)]
    pub completed_quests: Vec<String>,
    #[serde(default)]
    pub enemies_defeated: BTreeMap<String, u32>,
    #[serde(default)]
    pub items_gathered: BTreeMap<String, u32>,
    /// Shrine blessing: the next encounter's insight check succeeds without a roll
    #[serde(default)]
    pub has_wisdom_buff: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

impl Player {
    /// Creates a fresh character. A blank name falls back to the default.
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                default_name()
            } else {
                name.to_string()
            },
            hp: BASE_MAX_HP,
            max_hp: BASE_MAX_HP,
            silver: STARTING_SILVER,
            inventory: Vec::new(),
            skills: Skills::new(),
            location: default_location(),
            current_sub_location: None,
            current_quests: Vec::new(),
            completed_quests: Vec::new(),
            enemies_defeated: BTreeMap::new(),
            items_gathered: BTreeMap::new(),
            has_wisdom_buff: false,
        }
    }

    /// Repairs state that violates the aggregate's invariants, e.g. after loading a save
    /// written by an older or hand-edited schema.
    pub fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = default_name();
        }
        if self.max_hp <= 0 {
            warn!("Save has max_hp {}; resetting to {}", self.max_hp, BASE_MAX_HP);
            self.max_hp = BASE_MAX_HP;
        }
        self.hp = self.hp.clamp(0, self.max_hp);
        self.silver = self.silver.max(0);
        for skill in Skill::all() {
            let value = self.skills.get(skill);
            self.skills.set(skill, value);
        }

        let mut seen = Vec::with_capacity(self.completed_quests.len());
        self.completed_quests.retain(|q| {
            let fresh = !seen.contains(q);
            seen.push(q.clone());
            fresh
        });
        let completed = &self.completed_quests;
        let mut seen = Vec::with_capacity(self.current_quests.len());
        self.current_quests.retain(|q| {
            let keep = !completed.contains(q) && !seen.contains(q);
            seen.push(q.clone());
            keep
        });
    }

    // --- vitals ---

    /// Restores up to `amount` HP, never above max. Returns HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Applies damage, flooring HP at zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount.max(0)).max(0);
        before - self.hp
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Permanently raises max HP, and current HP by the same amount.
    pub fn raise_max_hp(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    // --- inventory ---

    pub fn add_item(&mut self, item: &str) {
        self.inventory.push(item.to_string());
    }

    /// Removes the first unit of `item`. Returns false if none was carried.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes up to `count` units of `item`, returning how many were removed.
    pub fn remove_items(&mut self, item: &str, count: u32) -> u32 {
        let mut removed = 0;
        while removed < count && self.remove_item(item) {
            removed += 1;
        }
        removed
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    pub fn count_item(&self, item: &str) -> usize {
        self.inventory.iter().filter(|i| *i == item).count()
    }

    /// Picks an item up from the world, counting it toward gather quests.
    pub fn pick_up(&mut self, item: &str) {
        self.add_item(item);
        *self.items_gathered.entry(item.to_string()).or_insert(0) += 1;
    }

    /// Distinct combat-usable items carried, in first-acquired order.
    pub fn combat_items(&self, registry: &Registry) -> Vec<String> {
        let mut usable: Vec<String> = Vec::new();
        for item in &self.inventory {
            let is_usable = registry
                .item(item)
                .is_some_and(|def| def.combat_effect().is_some());
            if is_usable && !usable.contains(item) {
                usable.push(item.clone());
            }
        }
        usable
    }

    /// Distinct edible items carried, in first-acquired order.
    pub fn edible_items(&self, registry: &Registry) -> Vec<String> {
        let mut edible: Vec<String> = Vec::new();
        for item in &self.inventory {
            if registry.is_edible(item) && !edible.contains(item) {
                edible.push(item.clone());
            }
        }
        edible
    }

    /// Eats one unit of an edible item, healing by a roll in its heal range.
    /// Returns HP restored.
    pub fn eat(
        &mut self,
        item: &str,
        registry: &Registry,
        dice: &mut impl Dice,
    ) -> Result<i32, PlayerError> {
        if !self.has_item(item) {
            return Err(PlayerError::NotCarried(item.to_string()));
        }
        let def = registry
            .item(item)
            .ok_or_else(|| PlayerError::UnknownItem(item.to_string()))?;
        if !def.edible {
            return Err(PlayerError::NotEdible(item.to_string()));
        }
        let amount = dice.roll(def.heal_min, def.heal_max);
        self.remove_item(item);
        Ok(self.heal(amount))
    }

    /// Sells one unit of `item` for its listed value. Returns silver earned.
    pub fn sell(&mut self, item: &str, registry: &Registry) -> Result<i32, PlayerError> {
        if !self.has_item(item) {
            return Err(PlayerError::NotCarried(item.to_string()));
        }
        let def = registry
            .item(item)
            .ok_or_else(|| PlayerError::UnknownItem(item.to_string()))?;
        if def.quest_item {
            return Err(PlayerError::QuestItem(item.to_string()));
        }
        self.remove_item(item);
        self.add_silver(def.value);
        Ok(def.value)
    }

    // --- currency ---

    pub fn add_silver(&mut self, amount: i32) {
        self.silver = self.silver.saturating_add(amount.max(0));
    }

    /// Deducts silver, leaving the balance untouched when it is insufficient.
    pub fn spend_silver(&mut self, amount: i32) -> Result<(), PlayerError> {
        if amount > self.silver {
            return Err(PlayerError::InsufficientSilver {
                needed: amount,
                available: self.silver,
            });
        }
        self.silver -= amount.max(0);
        Ok(())
    }

    // --- location ---

    /// Moves to a new location, leaving any sub-location.
    pub fn move_to(&mut self, location: &str) {
        self.location = location.to_string();
        self.current_sub_location = None;
    }

    pub fn enter_sub_location(&mut self, name: &str) {
        self.current_sub_location = Some(name.to_string());
    }

    pub fn leave_sub_location(&mut self) -> Option<String> {
        self.current_sub_location.take()
    }

    pub fn in_safe_zone(&self) -> bool {
        self.current_sub_location.is_some()
    }

    // --- quest bookkeeping ---

    pub fn record_kill(&mut self, enemy: &str) {
        *self.enemies_defeated.entry(enemy.to_string()).or_insert(0) += 1;
    }

    pub fn kills(&self, enemy: &str) -> u32 {
        self.enemies_defeated.get(enemy).copied().unwrap_or(0)
    }

    pub fn gathered(&self, item: &str) -> u32 {
        self.items_gathered.get(item).copied().unwrap_or(0)
    }

    pub fn is_quest_active(&self, quest: &str) -> bool {
        self.current_quests.iter().any(|q| q == quest)
    }

    pub fn is_quest_completed(&self, quest: &str) -> bool {
        self.completed_quests.iter().any(|q| q == quest)
    }
}
