//! Hugoland - trivia-driven progression game engine.
//!
//! The crate's heart is [`core::engine::apply`], a pure transition from one
//! [`core::GameState`] snapshot plus one [`core::GameAction`] to the next
//! snapshot. Everything else is the sub-logic it dispatches to, plus
//! persistence, a serializing session and a balance simulator.

pub mod character;
pub mod combat;
pub mod core;
pub mod economy;
pub mod items;
pub mod persistence;
pub mod scheduler;
pub mod session;
pub mod simulator;
pub mod skills;
