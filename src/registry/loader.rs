//! Loading and validation of the three definition files.

use super::types::{EnemyDef, ItemDef, ItemEffect, QuestDef, QuestObjective};
use super::Registry;
use crate::core::constants::{ENEMIES_FILE, ITEMS_FILE, QUESTS_FILE};
use crate::errors::RegistryError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Loads `items.json`, `enemies.json` and `quests.json` from `dir`.
///
/// Any missing or unparsable file is an error; there are no fallback definitions.
pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Registry, RegistryError> {
    let dir = dir.as_ref();
    let items = load_table(&dir.join(ITEMS_FILE))?;
    let enemies = load_table(&dir.join(ENEMIES_FILE))?;
    let quests = load_table(&dir.join(QUESTS_FILE))?;
    build(items, enemies, quests)
}

/// Builds a registry from in-memory JSON documents.
pub fn load_from_str(items: &str, enemies: &str, quests: &str) -> Result<Registry, RegistryError> {
    let items = parse_table(Path::new(ITEMS_FILE), items)?;
    let enemies = parse_table(Path::new(ENEMIES_FILE), enemies)?;
    let quests = parse_table(Path::new(QUESTS_FILE), quests)?;
    build(items, enemies, quests)
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<BTreeMap<String, T>, RegistryError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RegistryError::Missing {
            path: path.to_path_buf(),
        },
        _ => RegistryError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    parse_table(path, &contents)
}

fn parse_table<T: DeserializeOwned>(
    path: &Path,
    contents: &str,
) -> Result<BTreeMap<String, T>, RegistryError> {
    serde_json::from_str(contents).map_err(|e| RegistryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn build(
    items: BTreeMap<String, ItemDef>,
    enemies: BTreeMap<String, EnemyDef>,
    quests: BTreeMap<String, QuestDef>,
) -> Result<Registry, RegistryError> {
    for (name, item) in &items {
        validate_item(name, item)?;
    }
    for (name, enemy) in &enemies {
        validate_enemy(name, enemy)?;
    }
    for (name, quest) in &quests {
        validate_quest(name, quest)?;
    }

    let registry = Registry {
        items,
        enemies,
        quests,
    };
    warn_dangling_references(&registry);
    debug!(
        "Registry loaded: {} items, {} enemies, {} quests",
        registry.items.len(),
        registry.enemies.len(),
        registry.quests.len()
    );
    Ok(registry)
}

fn invalid(name: &str, reason: impl Into<String>) -> RegistryError {
    RegistryError::Invalid {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn validate_item(name: &str, item: &ItemDef) -> Result<(), RegistryError> {
    if item.value < 0 {
        return Err(invalid(name, "value must not be negative"));
    }
    if item.edible && (item.heal_min < 0 || item.heal_min > item.heal_max) {
        return Err(invalid(name, "heal range must satisfy 0 <= heal_min <= heal_max"));
    }
    match item.effect {
        Some(ItemEffect::DamageEnemy { min, max }) if min < 0 || min > max => {
            Err(invalid(name, "damage range must satisfy 0 <= min <= max"))
        }
        Some(ItemEffect::BuffPlayer { amount, .. }) if amount <= 0 => {
            Err(invalid(name, "buff amount must be positive"))
        }
        _ => Ok(()),
    }?;
    if item.combat_usable && item.effect.is_none() {
        return Err(invalid(name, "combat_usable items need an effect"));
    }
    if item.max_hp_increase() < 0 {
        return Err(invalid(name, "max_hp_increase must not be negative"));
    }
    Ok(())
}

fn validate_enemy(name: &str, enemy: &EnemyDef) -> Result<(), RegistryError> {
    if enemy.hp <= 0 {
        return Err(invalid(name, "hp must be positive"));
    }
    if enemy.attack < 0 {
        return Err(invalid(name, "attack must not be negative"));
    }
    let (min, max) = enemy.silver_drop;
    if min < 0 || min > max {
        return Err(invalid(name, "silver_drop must satisfy 0 <= min <= max"));
    }
    if let Some(entry) = enemy.drops.iter().find(|d| !(0..=100).contains(&d.chance)) {
        return Err(invalid(
            name,
            format!("drop chance for {} must be within 0-100", entry.item),
        ));
    }
    Ok(())
}

fn validate_quest(name: &str, quest: &QuestDef) -> Result<(), RegistryError> {
    if quest.objective.target_count() == Some(0) {
        return Err(invalid(name, "target_count must be at least 1"));
    }
    let rewards = &quest.rewards;
    if rewards.reward_hp.is_some_and(|hp| hp < 0) {
        return Err(invalid(name, "reward_hp must not be negative"));
    }
    if rewards.reward_silver.is_some_and(|s| s < 0) {
        return Err(invalid(name, "reward_silver must not be negative"));
    }
    if rewards.reward_skill.values().any(|v| *v < 0) {
        return Err(invalid(name, "reward_skill amounts must not be negative"));
    }
    Ok(())
}

/// Cross-table references are recoverable at runtime, so they only warn here.
fn warn_dangling_references(registry: &Registry) {
    for (enemy_name, enemy) in &registry.enemies {
        for entry in &enemy.drops {
            if registry.item(&entry.item).is_none() {
                warn!("Enemy {} drops unknown item {}", enemy_name, entry.item);
            }
        }
    }
    for (quest_name, quest) in &registry.quests {
        if let Some(item) = &quest.rewards.reward_item {
            if registry.item(item).is_none() {
                warn!("Quest {} rewards unknown item {}", quest_name, item);
            }
        }
        match &quest.objective {
            QuestObjective::DefeatEnemies { target_enemy, .. } => {
                if registry.enemy(target_enemy).is_none() {
                    warn!("Quest {} targets unknown enemy {}", quest_name, target_enemy);
                }
            }
            QuestObjective::GatherItems { target_item, .. }
            | QuestObjective::ItemFind { target_item } => {
                if registry.item(target_item).is_none() {
                    warn!("Quest {} targets unknown item {}", quest_name, target_item);
                }
            }
            QuestObjective::ReachLocation { .. } => {}
        }
    }
}
