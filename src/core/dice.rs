//! Integer dice used by every game roll.
//!
//! Any `rand::Rng` is a `Dice`, so the game runs on a real RNG while tests and replays
//! drive the exact same code with `ScriptedDice`.

use super::constants::{PERCENT_ROLL_MAX, PERCENT_ROLL_MIN};
use rand::Rng;
use std::collections::VecDeque;

pub trait Dice {
    /// Uniform roll in `low..=high`.
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// Percentile roll in `1..=100`.
    fn percent(&mut self) -> i32 {
        self.roll(PERCENT_ROLL_MIN, PERCENT_ROLL_MAX)
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// Dice that replay a fixed sequence of results.
///
/// Each queued value is clamped into the requested range. Once the script runs out every
/// roll returns the low end of its range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: i32) {
        self.rolls.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        match self.rolls.pop_front() {
            Some(value) => value.max(low).min(high.max(low)),
            None => low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_rolls_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..1000 {
            let roll = rng.roll(-1, 2);
            assert!((-1..=2).contains(&roll));
            let pct = rng.percent();
            assert!((1..=100).contains(&pct));
        }
    }

    #[test]
    fn test_degenerate_range_returns_low() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.roll(4, 4), 4);
    }

    #[test]
    fn test_scripted_dice_replays_and_clamps() {
        let mut dice = ScriptedDice::new([6, 0, 250]);
        assert_eq!(dice.roll(1, 6), 6);
        assert_eq!(dice.roll(-1, 2), 0);
        assert_eq!(dice.percent(), 100);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll(3, 9), 3);
    }
}
