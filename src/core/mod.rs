//! Game constants, dice, and the play session.

pub mod constants;
pub mod dice;
pub mod session;

pub use constants::*;
pub use dice::*;
pub use session::*;
