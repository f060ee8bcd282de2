//! Immutable item, enemy, and quest definitions loaded once at startup.

pub mod loader;
pub mod types;

pub use loader::{load_from_dir, load_from_str};
pub use types::*;

use std::collections::BTreeMap;

/// The static game definitions. Built by the loader and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    items: BTreeMap<String, ItemDef>,
    enemies: BTreeMap<String, EnemyDef>,
    quests: BTreeMap<String, QuestDef>,
}

impl Registry {
    pub fn item(&self, name: &str) -> Option<&ItemDef> {
        self.items.get(name)
    }

    pub fn enemy(&self, name: &str) -> Option<&EnemyDef> {
        self.enemies.get(name)
    }

    pub fn quest(&self, id: &str) -> Option<&QuestDef> {
        self.quests.get(id)
    }

    /// Item names eligible to appear in generated locations, in name order.
    pub fn spawnable_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, def)| def.spawnable)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn enemy_names(&self) -> Vec<&str> {
        self.enemies.keys().map(String::as_str).collect()
    }

    /// All quests in id order.
    pub fn quests(&self) -> impl Iterator<Item = (&str, &QuestDef)> {
        self.quests.iter().map(|(id, def)| (id.as_str(), def))
    }

    pub fn is_edible(&self, item: &str) -> bool {
        self.item(item).is_some_and(|def| def.edible)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }
}
