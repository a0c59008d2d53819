//! Offline progression.
//!
//! Converts time away from the game into a claimable pool of coins and gems,
//! scaled by the zone the player had reached.

use crate::core::constants::*;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineProgress {
    pub last_save_time: i64,
    pub offline_coins: u64,
    pub offline_gems: u64,
    /// Seconds of offline time represented by the pending pool.
    pub offline_time: i64,
    pub max_offline_hours: u32,
}

impl OfflineProgress {
    pub fn new(now: i64) -> Self {
        Self {
            last_save_time: now,
            offline_coins: 0,
            offline_gems: 0,
            offline_time: 0,
            max_offline_hours: DEFAULT_MAX_OFFLINE_HOURS,
        }
    }
}

impl Default for OfflineProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Coins and gems earned over `elapsed_seconds` at `zone`, after the offline cap.
pub fn calculate_offline_rewards(elapsed_seconds: i64, zone: u32, max_hours: u32) -> (u64, u64) {
    let capped = elapsed_seconds.clamp(0, max_hours as i64 * SECONDS_PER_HOUR);
    let hours = capped as f64 / SECONDS_PER_HOUR as f64;
    let coins = (hours * zone as f64 * OFFLINE_COINS_PER_ZONE_HOUR).floor() as u64;
    let gems = (hours * (1.0 + zone as f64 / 10.0)).floor() as u64;
    (coins, gems)
}

/// Accrue any qualifying gap since the last poll, then advance the marker to `now`.
///
/// Gaps shorter than the minimum are not offline time; the marker still moves
/// so the same seconds are never counted twice.
pub fn process_offline_progress(state: &mut GameState, now: i64) -> Vec<GameEvent> {
    let progress = &mut state.offline_progress;
    let elapsed = now - progress.last_save_time;
    let mut events = Vec::new();

    if elapsed >= OFFLINE_MIN_GAP_SECONDS {
        let (coins, gems) = calculate_offline_rewards(elapsed, state.zone, progress.max_offline_hours);
        if coins > 0 || gems > 0 {
            progress.offline_coins = progress.offline_coins.saturating_add(coins);
            progress.offline_gems = progress.offline_gems.saturating_add(gems);
            progress.offline_time += elapsed.min(progress.max_offline_hours as i64 * SECONDS_PER_HOUR);
            events.push(GameEvent::OfflineProgressAccrued { coins, gems });
        }
    }

    if now > progress.last_save_time {
        progress.last_save_time = now;
    }
    events
}

/// Move the pending pool into the wallet.
pub fn claim_offline_rewards(state: &mut GameState) -> Vec<GameEvent> {
    let progress = &mut state.offline_progress;
    let coins = std::mem::take(&mut progress.offline_coins);
    let gems = std::mem::take(&mut progress.offline_gems);
    progress.offline_time = 0;

    state.coins = state.coins.saturating_add(coins);
    state.gems = state.gems.saturating_add(gems);
    vec![GameEvent::OfflineRewardsClaimed { coins, gems }]
}
