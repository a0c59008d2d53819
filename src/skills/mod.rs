//! Adventure skills (per combat run) and menu skills (wall-clock buffs).

pub mod adventure;
pub mod menu;

pub use adventure::*;
pub use menu::*;
