//! Pure combat formulas.
//!
//! The encounter feeds these with dice results so every outcome can be checked without
//! randomness.

use crate::core::constants::*;

/// Percent threshold for the opening insight check (roll `1..=100` at or below succeeds).
pub fn insight_threshold(wisdom: i32) -> i32 {
    INSIGHT_CHANCE_PER_WISDOM.saturating_mul(wisdom.max(0))
}

/// Extra damage the insight bonus adds to one attack.
pub fn insight_bonus(wisdom: i32) -> i32 {
    (wisdom.max(0) / 2).saturating_add(INSIGHT_FLAT_BONUS)
}

/// Player attack damage from strength and a `1..=6` die roll, plus the insight bonus
/// when `insight_wisdom` is given.
pub fn attack_damage(strength: i32, die_roll: i32, insight_wisdom: Option<i32>) -> i32 {
    let base = strength.max(0).saturating_add(die_roll);
    match insight_wisdom {
        Some(wisdom) => base.saturating_add(insight_bonus(wisdom)),
        None => base,
    }
}

/// Percent threshold for a successful flight.
pub fn flee_threshold(agility: i32) -> i32 {
    FLEE_CHANCE_PER_AGILITY.saturating_mul(agility.max(0))
}

/// Probability (0.0-1.0) of dodging an enemy attack.
pub fn dodge_chance(agility: i32) -> f64 {
    let agility = agility.max(0) as f64;
    agility / (agility + DODGE_AGILITY_OFFSET as f64)
}

/// Whether a `1..=100` roll dodges, given the player's agility.
pub fn dodges(roll: i32, agility: i32) -> bool {
    (roll as f64) <= dodge_chance(agility) * 100.0
}

/// Enemy hit damage after a `-1..=2` variance roll, never negative.
pub fn enemy_damage(attack: i32, variance: i32) -> i32 {
    attack.saturating_add(variance).max(0)
}

/// Whether a `1..=100` roll passes a percent threshold.
pub fn passes(roll: i32, threshold: i32) -> bool {
    roll <= threshold
}
