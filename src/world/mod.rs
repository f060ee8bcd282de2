//! Generated locations.

pub mod generation;
pub mod location;

pub use generation::*;
pub use location::*;
