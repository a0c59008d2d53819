//! Reward, cost and rebalance formulas.
//!
//! Everything here is a pure function of its inputs so the combat engine,
//! the simulator and the tests share one set of numbers.

use crate::core::constants::*;
use crate::core::game_state::{GameState, PlayerStats};

fn floor_u64(value: f64) -> u64 {
    value.floor() as u64
}

/// `floor((50 + zone*10) * multiplier)`.
pub fn coin_reward(zone: u32, multiplier: f64) -> u64 {
    floor_u64((COIN_REWARD_BASE + zone as u64 * COIN_REWARD_PER_ZONE) as f64 * multiplier)
}

/// `floor((5 + floor(zone/5)) * multiplier)`.
pub fn gem_reward(zone: u32, multiplier: f64) -> u64 {
    floor_u64((GEM_REWARD_BASE + (zone / GEM_REWARD_ZONE_DIVISOR) as u64) as f64 * multiplier)
}

pub fn victory_experience(zone: u32) -> u64 {
    XP_PER_VICTORY_BASE + zone as u64 * XP_PER_VICTORY_PER_ZONE
}

/// Next upgrade cost: `floor(cost * 1.5)`.
pub fn next_upgrade_cost(cost: u64) -> u64 {
    floor_u64(cost as f64 * UPGRADE_COST_FACTOR)
}

pub fn relic_sell_value(cost: u64) -> u64 {
    floor_u64(cost as f64 * RELIC_SELL_FRACTION)
}

/// Hits needed to kill an enemy with `max_hp` and `enemy_def` at the given attack.
pub fn hits_needed(enemy_max_hp: u32, atk: u32, enemy_def: u32) -> u32 {
    let per_hit = atk.saturating_sub(enemy_def).max(1);
    enemy_max_hp.div_ceil(per_hit)
}

/// Anti-inflation ratchet. Returns true if stats were raised.
pub fn rebalance(stats: &mut PlayerStats, enemy_max_hp: u32, enemy_def: u32) -> bool {
    if hits_needed(enemy_max_hp, stats.atk, enemy_def) <= MAX_HITS_BEFORE_BOOST {
        return false;
    }
    stats.atk = stats.atk.saturating_mul(2);
    stats.def = stats.def.saturating_mul(2);
    stats.max_hp = (stats.max_hp as f64 * BOOST_HP_FACTOR).floor() as u32;
    stats.full_heal();
    true
}

/// Respawn zone after a paid revival: `max(1, floor((zone-1)/5)*5 + 1)`.
pub fn checkpoint_zone(zone: u32) -> u32 {
    let zone = zone.max(1);
    ((zone - 1) / CHECKPOINT_SPACING * CHECKPOINT_SPACING + 1).max(1)
}

/// Coins and gems taken by a checkpoint revival.
pub fn revival_cost(coins: u64, gems: u64) -> (u64, u64) {
    (
        floor_u64(coins as f64 * REVIVAL_COST_FRACTION),
        floor_u64(gems as f64 * REVIVAL_COST_FRACTION),
    )
}

/// Combined non-streak multipliers applied to victory rewards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardMultipliers {
    pub coins: f64,
    pub gems: f64,
    pub experience: f64,
}

impl RewardMultipliers {
    /// Menu skill (if still live), research bonuses and global multipliers.
    pub fn for_state(state: &GameState, now: i64) -> Self {
        let menu = state.skills.live_skill(now).map(|s| s.skill_type);
        let research = &state.research.bonuses;
        Self {
            coins: menu.map_or(1.0, |t| t.coin_multiplier())
                * research.coin_multiplier
                * state.multipliers.coins,
            gems: menu.map_or(1.0, |t| t.gem_multiplier())
                * research.gem_multiplier
                * state.multipliers.gems,
            experience: menu.map_or(1.0, |t| t.xp_multiplier()) * research.xp_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_one_rewards_without_streak() {
        assert_eq!(coin_reward(1, 1.0), 60);
        assert_eq!(gem_reward(1, 1.0), 5);
    }

    #[test]
    fn test_rewards_scale_with_streak() {
        assert_eq!(coin_reward(10, 1.5), 225);
        assert_eq!(gem_reward(10, 1.5), 10);
    }

    #[test]
    fn test_upgrade_cost_compounds_with_floor() {
        let once = next_upgrade_cost(100);
        assert_eq!(once, 150);
        assert_eq!(next_upgrade_cost(once), 225);
        assert_eq!(next_upgrade_cost(5), 7);
    }

    #[test]
    fn test_checkpoint_zones() {
        assert_eq!(checkpoint_zone(1), 1);
        assert_eq!(checkpoint_zone(5), 1);
        assert_eq!(checkpoint_zone(6), 6);
        assert_eq!(checkpoint_zone(13), 11);
        assert_eq!(checkpoint_zone(0), 1);
    }

    #[test]
    fn test_revival_cost_halves_floor() {
        assert_eq!(revival_cost(100, 40), (50, 20));
        assert_eq!(revival_cost(7, 1), (3, 0));
    }

    #[test]
    fn test_hits_needed_rounds_up() {
        assert_eq!(hits_needed(70, 20, 10), 7);
        assert_eq!(hits_needed(50, 20, 10), 5);
        assert_eq!(hits_needed(10, 1, 50), 10);
    }

    #[test]
    fn test_rebalance_triggers_above_threshold() {
        let mut stats = PlayerStats::new();
        stats.hp = 40;
        assert!(rebalance(&mut stats, 70, 10));
        assert_eq!(stats.atk, 40);
        assert_eq!(stats.def, 20);
        assert_eq!(stats.max_hp, 150);
        assert_eq!(stats.hp, 150);
    }

    #[test]
    fn test_rebalance_leaves_stats_at_threshold() {
        let mut stats = PlayerStats::new();
        assert!(!rebalance(&mut stats, 50, 10));
        assert_eq!(stats, PlayerStats::new());
    }

    #[test]
    fn test_relic_sell_value() {
        assert_eq!(relic_sell_value(75), 37);
    }
}
