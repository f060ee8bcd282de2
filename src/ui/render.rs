//! Plain-text rendering of game state and combat events.

use crate::character::player::Player;
use crate::character::save::SaveInfo;
use crate::character::skills::Skill;
use crate::combat::{CombatEvent, Encounter};
use crate::quests::{active_quests, progress_label, QuestCompletion};
use crate::registry::Registry;
use crate::world::Location;
use chrono::{Local, TimeZone};

pub fn location_text(location: &Location) -> String {
    let mut lines = vec![format!("--- {} ---", location.name), location.description.clone()];
    if !location.items.is_empty() {
        lines.push(format!("  You see: {}", location.items.join(", ")));
    }
    if !location.enemies.is_empty() {
        lines.push(format!("  Danger nearby: {}", location.enemies.join(", ")));
    }
    if location.is_safe_zone() {
        lines.push(format!("  A safe hamlet. Places: {}", location.sub_locations.join(", ")));
    }
    lines.join("\n")
}

pub fn status_text(player: &Player, registry: &Registry) -> String {
    let mut lines = vec![
        format!("--- {}'s Status ---", player.name),
        format!("  HP: {}/{}", player.hp, player.max_hp),
        format!("  Silver: {}", player.silver),
    ];
    let inventory = if player.inventory.is_empty() {
        "Empty".to_string()
    } else {
        player.inventory.join(", ")
    };
    lines.push(format!("  Inventory: {}", inventory));
    lines.push("  Skills:".to_string());
    for skill in Skill::all() {
        lines.push(format!("    - {}: {}", skill, player.skills.get(skill)));
    }
    match &player.current_sub_location {
        Some(place) => lines.push(format!("  Location: {} ({})", player.location, place)),
        None => lines.push(format!("  Location: {}", player.location)),
    }
    if player.has_wisdom_buff {
        lines.push("  Blessed by the shrine".to_string());
    }

    lines.push("  Active Quests:".to_string());
    let active = active_quests(registry, player);
    if active.is_empty() {
        lines.push("    None".to_string());
    }
    for (id, quest) in active {
        lines.push(format!(
            "    - {}: {}{}",
            id,
            quest.description,
            progress_label(player, quest)
        ));
    }
    let completed = if player.completed_quests.is_empty() {
        "None".to_string()
    } else {
        player.completed_quests.join(", ")
    };
    lines.push(format!("  Completed Quests: {}", completed));
    lines.join("\n")
}

pub fn encounter_header(encounter: &Encounter<'_>) -> String {
    let player = encounter.player();
    let enemy = encounter.enemy();
    let mut header = format!(
        "{} HP {}/{}  vs  {} HP {}/{}",
        player.name,
        player.hp,
        player.max_hp,
        enemy.name,
        enemy.display_hp(),
        enemy.max_hp
    );
    if encounter.insight_ready() {
        header.push_str("  [insight]");
    }
    header
}

pub fn event_text(event: &CombatEvent, enemy: &str) -> String {
    match event {
        CombatEvent::PlayerAttack {
            damage,
            insight: true,
        } => format!("Insight guides your blow! You strike the {} for {} damage.", enemy, damage),
        CombatEvent::PlayerAttack { damage, .. } => {
            format!("You strike the {} for {} damage.", enemy, damage)
        }
        CombatEvent::ItemDamage { item, damage } => {
            format!("You use {} on the {} for {} damage.", item, enemy, damage)
        }
        CombatEvent::Buffed {
            item,
            skill,
            amount,
        } => format!("You use {}. {} +{} for this fight.", item, skill, amount),
        CombatEvent::NoUsableItems => "You have nothing usable in combat.".to_string(),
        CombatEvent::ItemDeclined => "You put your pack away.".to_string(),
        CombatEvent::FleeFailed => "You fail to escape!".to_string(),
        CombatEvent::Fled => "You escape!".to_string(),
        CombatEvent::Dodged => format!("You dodge the {}'s attack.", enemy),
        CombatEvent::EnemyAttack { damage } => {
            format!("The {} hits you for {} damage.", enemy, damage)
        }
        CombatEvent::EnemyDefeated {
            enemy,
            silver,
            items,
        } => {
            let mut text = format!("The {} is defeated! You gain {} silver.", enemy, silver);
            if !items.is_empty() {
                text.push_str(&format!(" Loot: {}.", items.join(", ")));
            }
            text
        }
        CombatEvent::PlayerDefeated => "You have fallen...".to_string(),
    }
}

pub fn completion_text(completion: &QuestCompletion) -> String {
    let rewards = &completion.rewards;
    let mut parts = Vec::new();
    if rewards.hp_restored > 0 {
        parts.push(format!("{} HP", rewards.hp_restored));
    }
    if rewards.silver > 0 {
        parts.push(format!("{} silver", rewards.silver));
    }
    for (skill, amount) in &rewards.skills {
        parts.push(format!("{} +{}", skill, amount));
    }
    if let Some(item) = &rewards.item {
        parts.push(item.clone());
    }
    if rewards.max_hp_increase > 0 {
        parts.push(format!("max HP +{}", rewards.max_hp_increase));
    }
    if parts.is_empty() {
        format!("Quest complete: {}!", completion.quest)
    } else {
        format!("Quest complete: {}! Rewards: {}", completion.quest, parts.join(", "))
    }
}

pub fn save_line(info: &SaveInfo) -> String {
    if info.is_corrupted {
        return format!("{}  {}", info.slot, info.player_name);
    }
    let when = Local
        .timestamp_opt(info.saved_at, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string());
    format!(
        "{}  {} at {} ({})",
        info.slot, info.player_name, info.location, when
    )
}
