//! Quest offers and progress display.

use crate::character::player::Player;
use crate::errors::QuestError;
use crate::registry::{QuestDef, QuestObjective, Registry};

/// Quests the player has neither accepted nor finished, in id order.
pub fn available_quests<'r>(registry: &'r Registry, player: &Player) -> Vec<(&'r str, &'r QuestDef)> {
    registry
        .quests()
        .filter(|(id, _)| !player.is_quest_active(id) && !player.is_quest_completed(id))
        .collect()
}

/// Active quests that still exist in the registry, in acceptance order.
pub fn active_quests<'r>(registry: &'r Registry, player: &Player) -> Vec<(String, &'r QuestDef)> {
    player
        .current_quests
        .iter()
        .filter_map(|id| registry.quest(id).map(|def| (id.clone(), def)))
        .collect()
}

pub fn accept_quest(registry: &Registry, player: &mut Player, quest_id: &str) -> Result<(), QuestError> {
    if registry.quest(quest_id).is_none() {
        return Err(QuestError::Unknown(quest_id.to_string()));
    }
    if player.is_quest_completed(quest_id) {
        return Err(QuestError::AlreadyCompleted(quest_id.to_string()));
    }
    if player.is_quest_active(quest_id) {
        return Err(QuestError::AlreadyActive(quest_id.to_string()));
    }
    player.current_quests.push(quest_id.to_string());
    Ok(())
}

/// " (current/target)" for counter-based quests, empty otherwise.
pub fn progress_label(player: &Player, quest: &QuestDef) -> String {
    match &quest.objective {
        QuestObjective::DefeatEnemies {
            target_enemy,
            target_count,
        } => format!(" ({}/{})", player.kills(target_enemy), target_count),
        QuestObjective::GatherItems {
            target_item,
            target_count,
        } => format!(" ({}/{})", player.gathered(target_item), target_count),
        QuestObjective::ItemFind { .. } | QuestObjective::ReachLocation { .. } => String::new(),
    }
}
