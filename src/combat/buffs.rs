use crate::character::skills::{Skill, Skills};
use std::collections::BTreeMap;

/// Temporary skill boosts granted during one encounter.
///
/// Every amount applied through the ledger is recorded so `revert` can take exactly that
/// much back off the player's skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuffLedger {
    active: BTreeMap<Skill, i32>,
}

impl BuffLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, skills: &mut Skills, skill: Skill, amount: i32) {
        skills.add(skill, amount);
        *self.active.entry(skill).or_insert(0) += amount;
    }

    /// Removes every recorded boost from `skills` and empties the ledger.
    pub fn revert(&mut self, skills: &mut Skills) {
        for (skill, amount) in std::mem::take(&mut self.active) {
            skills.add(skill, -amount);
        }
    }

    pub fn amount(&self, skill: Skill) -> i32 {
        self.active.get(&skill).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
