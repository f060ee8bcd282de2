//! The player aggregate, its skills, and save files.

pub mod player;
pub mod save;
pub mod skills;

pub use player::*;
pub use save::*;
pub use skills::*;
