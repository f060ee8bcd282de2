//! Aorte - a turn-based text adventure.
//!
//! The library holds the whole game core so it can be driven and tested without a terminal.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod errors;
pub mod quests;
pub mod registry;
pub mod ui;
pub mod world;
