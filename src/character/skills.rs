use crate::core::constants::BASE_SKILL_VALUE;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Skill {
    Strength,
    Agility,
    Wisdom,
}

impl Skill {
    pub fn all() -> [Skill; 3] {
        [Skill::Strength, Skill::Agility, Skill::Wisdom]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Strength => "Strength",
            Skill::Agility => "Agility",
            Skill::Wisdom => "Wisdom",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn base_skill() -> i32 {
    BASE_SKILL_VALUE
}

/// Skill values, serialized as a `{"Strength": n, ...}` map.
///
/// Each field falls back to the baseline when absent so saves written before a skill
/// existed still load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skills {
    #[serde(rename = "Strength", default = "base_skill")]
    strength: i32,
    #[serde(rename = "Agility", default = "base_skill")]
    agility: i32,
    #[serde(rename = "Wisdom", default = "base_skill")]
    wisdom: i32,
}

impl Default for Skills {
    fn default() -> Self {
        Self::new()
    }
}

impl Skills {
    pub fn new() -> Self {
        Self {
            strength: BASE_SKILL_VALUE,
            agility: BASE_SKILL_VALUE,
            wisdom: BASE_SKILL_VALUE,
        }
    }

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Strength => self.strength,
            Skill::Agility => self.agility,
            Skill::Wisdom => self.wisdom,
        }
    }

    pub fn set(&mut self, skill: Skill, value: i32) {
        let slot = self.slot_mut(skill);
        *slot = value.max(0);
    }

    /// Adds `amount` (which may be negative) and floors the result at zero.
    pub fn add(&mut self, skill: Skill, amount: i32) {
        let slot = self.slot_mut(skill);
        *slot = slot.saturating_add(amount).max(0);
    }

    fn slot_mut(&mut self, skill: Skill) -> &mut i32 {
        match skill {
            Skill::Strength => &mut self.strength,
            Skill::Agility => &mut self.agility,
            Skill::Wisdom => &mut self.wisdom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_skills_are_baseline() {
        let skills = Skills::new();
        for skill in Skill::all() {
            assert_eq!(skills.get(skill), BASE_SKILL_VALUE);
        }
    }

    #[test]
    fn test_add_floors_at_zero() {
        let mut skills = Skills::new();
        skills.add(Skill::Agility, -10);
        assert_eq!(skills.get(Skill::Agility), 0);
        skills.add(Skill::Agility, 4);
        assert_eq!(skills.get(Skill::Agility), 4);
    }

    #[test]
    fn test_serializes_as_named_map() {
        let mut skills = Skills::new();
        skills.set(Skill::Wisdom, 7);
        let json = serde_json::to_value(skills).unwrap();
        assert_eq!(json["Strength"], 3);
        assert_eq!(json["Wisdom"], 7);
    }

    #[test]
    fn test_missing_skill_uses_baseline() {
        let skills: Skills = serde_json::from_str(r#"{"Strength": 9, "Wisdom": 1}"#).unwrap();
        assert_eq!(skills.get(Skill::Strength), 9);
        assert_eq!(skills.get(Skill::Agility), BASE_SKILL_VALUE);
        assert_eq!(skills.get(Skill::Wisdom), 1);
    }
}
