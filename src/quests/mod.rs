//! Quest completion tracking and the quest board.

pub mod board;
pub mod tracker;

pub use board::*;
pub use tracker::*;
