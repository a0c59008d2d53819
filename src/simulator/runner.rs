//! Monte Carlo driver over the real transition engine.
//!
//! Every simulated action goes through `core::engine::apply`, so results
//! follow gameplay rules exactly. Statistics are read back from the emitted
//! events rather than by diffing states.

use super::config::{SimConfig, SkillPolicy};
use super::report::{RunStats, SimReport};
use crate::combat::CombatPhase;
use crate::core::constants::MARKET_POLL_INTERVAL_SECONDS;
use crate::core::engine::{apply, GameAction};
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::items::generation::StandardContent;
use crate::items::types::{ChestReward, GearKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIM_START_TIME: i64 = 1_700_000_000;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let r = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Zone {}, Level {}, Victories {}, Deaths {}, Turns {}",
                run_idx + 1,
                config.num_runs,
                r.final_zone,
                r.final_level,
                r.victories,
                r.deaths,
                r.turns
            );
        }
        all_runs.push(r);
    }

    SimReport::from_runs(all_runs)
}

struct SimDriver<'a, R: Rng> {
    state: GameState,
    now: i64,
    last_poll: i64,
    stats: RunStats,
    rng: &'a mut R,
}

impl<R: Rng> SimDriver<'_, R> {
    fn act(&mut self, action: GameAction) -> bool {
        let t = apply(&self.state, &action, self.now, &StandardContent, &mut *self.rng);
        for event in &t.events {
            self.record(event);
        }
        self.state = t.state;
        t.accepted
    }

    fn record(&mut self, event: &GameEvent) {
        let stats = &mut self.stats;
        match event {
            GameEvent::EnemyDefeated { .. } => stats.victories += 1,
            GameEvent::RewardsGranted { coins, .. } => stats.coins_earned += coins,
            GameEvent::PlayerDied => stats.deaths += 1,
            GameEvent::RevivedAtCheckpoint { .. } => stats.revivals += 1,
            GameEvent::PhoenixRevived { .. } => stats.phoenix_saves += 1,
            GameEvent::StatsBoosted { .. } => stats.boosts += 1,
            GameEvent::FragmentFound { .. } => stats.fragments += 1,
            GameEvent::ChestOpened { .. } => stats.chests_opened += 1,
            _ => {}
        }
    }

    fn advance_clock(&mut self, seconds: i64) {
        self.now += seconds;
        if self.now - self.last_poll >= MARKET_POLL_INTERVAL_SECONDS as i64 {
            self.last_poll = self.now;
            self.act(GameAction::Tick);
        }
    }

    /// Open one chest and equip its item if it beats the current slot.
    fn shop(&mut self, cost: u64) {
        if self.state.coins < cost.saturating_mul(2) {
            return;
        }
        let t = apply(
            &self.state,
            &GameAction::OpenChest { cost },
            self.now,
            &StandardContent,
            &mut *self.rng,
        );
        for event in &t.events {
            self.record(event);
        }
        self.state = t.state;

        let Some(reward) = t.events.iter().find_map(|e| match e {
            GameEvent::ChestOpened { reward } => Some(reward.clone()),
            _ => None,
        }) else {
            return;
        };
        if self.is_upgrade(&reward) {
            let id = reward.item_id().to_string();
            let action = match reward.kind() {
                GearKind::Weapon => GameAction::EquipWeapon { id },
                GearKind::Armor => GameAction::EquipArmor { id },
            };
            self.act(action);
        }
    }

    fn is_upgrade(&self, reward: &ChestReward) -> bool {
        let inventory = &self.state.inventory;
        match reward {
            ChestReward::Weapon { item, .. } => {
                inventory.equipped_weapon().map_or(0, |w| w.base_atk) < item.base_atk
            }
            ChestReward::Armor { item, .. } => {
                inventory.equipped_armor().map_or(0, |a| a.base_def) < item.base_def
            }
        }
    }
}

/// Simulate a single run from a fresh game until target, defeat or timeout.
fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let state = GameState::new(SIM_START_TIME, &StandardContent, rng);
    let mut sim = SimDriver {
        state,
        now: SIM_START_TIME,
        last_poll: SIM_START_TIME,
        stats: RunStats::default(),
        rng,
    };

    while sim.stats.turns < config.max_turns_per_run {
        if sim.state.zone >= config.target_zone {
            sim.stats.reached_target = true;
            break;
        }

        match sim.state.combat_phase() {
            CombatPhase::NotInCombat => {
                if sim.state.player_stats.hp == 0 {
                    if !config.revive_on_defeat || !sim.act(GameAction::ReviveAtCheckpoint) {
                        sim.stats.perished = true;
                        break;
                    }
                }
                if let Some(cost) = config.chest_cost {
                    sim.shop(cost);
                }
                sim.act(GameAction::StartCombat);
            }
            CombatPhase::SelectingSkill => {
                let first = sim
                    .state
                    .adventure_skills
                    .available_skills
                    .first()
                    .map(|s| s.id.clone());
                let action = match (config.skill_policy, first) {
                    (SkillPolicy::TakeFirst, Some(skill_id)) => {
                        GameAction::SelectAdventureSkill { skill_id }
                    }
                    _ => GameAction::SkipAdventureSkills,
                };
                sim.act(action);
            }
            CombatPhase::InCombat => {
                let hit = sim.rng.gen_bool(config.accuracy.clamp(0.0, 1.0));
                sim.act(GameAction::Attack {
                    hit,
                    category: None,
                });
                sim.stats.turns += 1;
                sim.advance_clock(config.seconds_per_turn);
            }
        }
    }

    sim.stats.final_zone = sim.state.zone;
    sim.stats.final_level = sim.state.progression.level;
    sim.stats
}
