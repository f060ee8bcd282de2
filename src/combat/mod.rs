//! Turn-based combat: one encounter at a time against a single enemy.

pub mod buffs;
pub mod logic;
pub mod math;
pub mod types;

pub use buffs::*;
pub use logic::*;
pub use types::*;
