//! Game balance simulator for Monte Carlo analysis.
//!
//! Runs many simulated playthroughs through the real transition engine to
//! analyze zone pacing, death rates and how often the anti-inflation boost
//! fires at a given answer accuracy.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, SkillPolicy};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
