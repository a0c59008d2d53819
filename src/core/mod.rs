//! Core game state, events and the transition engine.

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod game_state;

pub use constants::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use game_state::*;
