//! Wall-clock subsystems: market rotation, garden, offline accrual, daily
//! rewards and menu-skill expiry.

pub mod daily;
pub mod garden;
pub mod market;
pub mod offline;
pub mod tick;

pub use daily::*;
pub use garden::*;
pub use market::*;
pub use offline::*;
pub use tick::*;
