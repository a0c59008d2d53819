//! Character progression: experience, levels, skill points, prestige.

pub mod progression;

pub use progression::*;
