use crate::character::player::Player;
use crate::character::skills::Skill;
use crate::registry::{QuestDef, QuestObjective, Registry};
use log::{info, warn};

/// Rewards actually granted for one completed quest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedRewards {
    pub hp_restored: i32,
    pub silver: i32,
    pub skills: Vec<(Skill, i32)>,
    pub item: Option<String>,
    pub max_hp_increase: i32,
    /// Target items handed in by a gather quest
    pub items_consumed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest: String,
    pub rewards: AppliedRewards,
}

/// Checks active quests against the player and pays out the ones that are done.
pub struct QuestTracker<'r> {
    registry: &'r Registry,
}

impl<'r> QuestTracker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Whether the player currently meets the quest's objective.
    pub fn is_satisfied(player: &Player, quest: &QuestDef) -> bool {
        match &quest.objective {
            QuestObjective::DefeatEnemies {
                target_enemy,
                target_count,
            } => player.kills(target_enemy) >= *target_count,
            QuestObjective::GatherItems {
                target_item,
                target_count,
            } => player.gathered(target_item) >= *target_count,
            QuestObjective::ItemFind { target_item } => player.has_item(target_item),
            QuestObjective::ReachLocation { target_location } => {
                player.location == *target_location
            }
        }
    }

    /// Completes every satisfied active quest, in active-list order, and returns what was
    /// granted.
    ///
    /// Passes repeat until nothing changes, so a reward that satisfies an earlier quest is
    /// picked up in the same call and a second call with no state change does nothing.
    pub fn evaluate(&self, player: &mut Player) -> Vec<QuestCompletion> {
        let mut completions = Vec::new();
        loop {
            let before = completions.len();
            let active = player.current_quests.clone();
            for quest_id in active {
                let Some(quest) = self.registry.quest(&quest_id) else {
                    warn!("Dropping unknown quest {} from active list", quest_id);
                    player.current_quests.retain(|q| *q != quest_id);
                    continue;
                };
                if Self::is_satisfied(player, quest) {
                    let rewards = self.complete(player, &quest_id, quest);
                    completions.push(QuestCompletion {
                        quest: quest_id,
                        rewards,
                    });
                }
            }
            if completions.len() == before {
                return completions;
            }
        }
    }

    fn complete(&self, player: &mut Player, quest_id: &str, quest: &QuestDef) -> AppliedRewards {
        let mut applied = AppliedRewards::default();
        let rewards = &quest.rewards;

        if let Some(hp) = rewards.reward_hp {
            applied.hp_restored = player.heal(hp);
        }
        if let Some(silver) = rewards.reward_silver {
            player.add_silver(silver);
            applied.silver = silver;
        }
        for (skill, amount) in &rewards.reward_skill {
            player.skills.add(*skill, *amount);
            applied.skills.push((*skill, *amount));
        }
        if let Some(item) = &rewards.reward_item {
            match self.registry.item(item) {
                Some(def) => {
                    player.add_item(item);
                    let increase = def.max_hp_increase();
                    if increase > 0 {
                        player.raise_max_hp(increase);
                        applied.max_hp_increase = increase;
                    }
                    applied.item = Some(item.clone());
                }
                None => warn!("Quest {} rewards unknown item {}; skipping", quest_id, item),
            }
        }

        player.current_quests.retain(|q| q != quest_id);
        if !player.is_quest_completed(quest_id) {
            player.completed_quests.push(quest_id.to_string());
        }

        match &quest.objective {
            QuestObjective::DefeatEnemies { target_enemy, .. } => {
                player.enemies_defeated.insert(target_enemy.clone(), 0);
            }
            QuestObjective::GatherItems {
                target_item,
                target_count,
            } => {
                player.items_gathered.insert(target_item.clone(), 0);
                applied.items_consumed = player.remove_items(target_item, *target_count);
            }
            QuestObjective::ItemFind { .. } | QuestObjective::ReachLocation { .. } => {}
        }

        info!("Quest completed: {}", quest_id);
        applied
    }
}
