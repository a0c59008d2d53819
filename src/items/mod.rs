//! Item system: types, generation, inventory management and relics.

pub mod generation;
pub mod inventory;
pub mod relics;
pub mod types;

pub use generation::*;
pub use inventory::*;
pub use relics::*;
pub use types::*;
