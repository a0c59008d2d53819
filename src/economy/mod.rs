//! Currency rewards, costs, shops and the fragment merchant.

pub mod merchant;
pub mod rewards;
pub mod shop;
pub mod wallet;

pub use merchant::*;
pub use rewards::*;
pub use shop::*;
pub use wallet::*;
