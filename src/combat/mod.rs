//! Combat: the per-turn damage pipeline and the encounter state machine.

pub mod logic;
pub mod pipeline;
pub mod types;

pub use logic::*;
pub use pipeline::*;
pub use types::*;
