//! Daily login rewards keyed on UTC calendar days.

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReward {
    pub day: u32,
    pub coins: u64,
    pub gems: u64,
    pub claimed: bool,
    #[serde(default)]
    pub claim_date: Option<i64>,
}

impl DailyReward {
    pub fn for_day(day: u32) -> Self {
        let day = day.clamp(1, DAILY_STREAK_CAP);
        Self {
            day,
            coins: DAILY_COINS_PER_DAY * day as u64,
            gems: DAILY_GEMS_PER_DAY * day as u64,
            claimed: false,
            claim_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRewards {
    pub last_claim_date: Option<i64>,
    pub current_streak: u32,
    pub max_streak: u32,
    pub available_reward: Option<DailyReward>,
    pub reward_history: Vec<DailyReward>,
}

fn utc_day(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

/// Whole UTC days between the last claim and `now`, or None if never claimed.
fn days_since_claim(rewards: &DailyRewards, now: i64) -> Option<i64> {
    let last = utc_day(rewards.last_claim_date?)?;
    let today = utc_day(now)?;
    Some((today - last).num_days())
}

/// Streak the player would be on if they claimed at `now`.
fn streak_at(rewards: &DailyRewards, now: i64) -> u32 {
    match days_since_claim(rewards, now) {
        Some(1) => rewards.current_streak + 1,
        Some(0) => rewards.current_streak.max(1),
        _ => 1,
    }
}

/// Offer today's reward if nothing is pending and today has not been claimed.
pub fn check_daily_reward(state: &mut GameState, now: i64) -> Vec<GameEvent> {
    let rewards = &mut state.daily_rewards;
    if rewards.available_reward.is_some() {
        return Vec::new();
    }
    let eligible = match days_since_claim(rewards, now) {
        None => true,
        Some(days) => days >= 1,
    };
    if !eligible {
        return Vec::new();
    }

    let reward = DailyReward::for_day(streak_at(rewards, now));
    let day = reward.day;
    rewards.available_reward = Some(reward);
    vec![GameEvent::DailyRewardAvailable { day }]
}

pub fn claim_daily_reward(state: &mut GameState, now: i64) -> Result<Vec<GameEvent>, Rejection> {
    let streak = streak_at(&state.daily_rewards, now);
    let rewards = &mut state.daily_rewards;
    if rewards.available_reward.take().is_none() {
        return Err(Rejection::NothingToClaim);
    }
    // Pay for the streak as of the claim, not as of the offer.
    let mut reward = DailyReward::for_day(streak);

    rewards.current_streak = streak;
    rewards.max_streak = rewards.max_streak.max(streak);
    rewards.last_claim_date = Some(now);
    reward.claimed = true;
    reward.claim_date = Some(now);
    rewards.reward_history.push(reward.clone());

    state.coins = state.coins.saturating_add(reward.coins);
    state.gems = state.gems.saturating_add(reward.gems);

    Ok(vec![GameEvent::DailyRewardClaimed {
        day: reward.day,
        coins: reward.coins,
        gems: reward.gems,
    }])
}
