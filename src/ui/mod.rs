//! Text front-end: prompts, rendering, and the play loop.

mod combat;
pub mod console;
pub mod play;
pub mod render;

pub use combat::ConsoleDriver;
pub use console::Console;
pub use play::play;
