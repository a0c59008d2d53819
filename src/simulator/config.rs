//! Simulation configuration.

/// How the simulated player answers the skill selection round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPolicy {
    /// Always take the first offered skill.
    TakeFirst,
    /// Always skip the round.
    Skip,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Zone a run must reach to count as completed
    pub target_zone: u32,

    /// Probability that the simulated player answers correctly
    pub accuracy: f64,

    /// Maximum answered questions per run before timeout
    pub max_turns_per_run: u64,

    /// Simulated seconds between two answers
    pub seconds_per_turn: i64,

    pub skill_policy: SkillPolicy,

    /// Pay for a checkpoint revival after a defeat instead of ending the run
    pub revive_on_defeat: bool,

    /// Open a chest of this cost whenever twice its price is on hand
    pub chest_cost: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 500,
            seed: None,
            target_zone: 25,
            accuracy: 0.75,
            max_turns_per_run: 20_000,
            seconds_per_turn: 10,
            skill_policy: SkillPolicy::TakeFirst,
            revive_on_defeat: true,
            chest_cost: Some(200),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for testing zone balance
    pub fn zone_balance_test(target_zone: u32) -> Self {
        Self {
            num_runs: 100,
            target_zone,
            ..Default::default()
        }
    }

    /// A player who never misses; bounds how fast progression can go.
    pub fn perfect_player() -> Self {
        Self {
            num_runs: 50,
            accuracy: 1.0,
            target_zone: 50,
            ..Default::default()
        }
    }

    /// A coin-flip player with no skills and no shopping.
    pub fn struggling_player() -> Self {
        Self {
            accuracy: 0.5,
            skill_policy: SkillPolicy::Skip,
            chest_cost: None,
            ..Default::default()
        }
    }
}
