//! Hugoland fragments and the merchant that trades them for rewards.

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantRewardKind {
    Coins,
    Gems,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantReward {
    pub id: String,
    pub kind: MerchantRewardKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub gems: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub hugoland_fragments: u32,
    pub total_fragments_earned: u32,
    pub last_fragment_zone: u32,
    pub show_reward_modal: bool,
    pub available_rewards: Vec<MerchantReward>,
}

impl Merchant {
    /// Award one fragment for reaching `zone` if it is a fragment zone not yet paid out.
    pub fn award_fragment(&mut self, zone: u32) -> bool {
        if zone % FRAGMENT_ZONE_INTERVAL != 0 || zone <= self.last_fragment_zone {
            return false;
        }
        self.hugoland_fragments += 1;
        self.total_fragments_earned += 1;
        self.last_fragment_zone = zone;
        true
    }
}

fn roll_reward(rng: &mut impl Rng) -> MerchantReward {
    let id = format!("{:016x}", rng.gen::<u64>());
    if rng.gen_bool(0.5) {
        MerchantReward {
            id,
            kind: MerchantRewardKind::Coins,
            name: "Coin Reward".to_string(),
            description: "A pile of coins".to_string(),
            coins: rng.gen_range(MERCHANT_COINS_MIN..=MERCHANT_COINS_MAX),
            gems: 0,
        }
    } else {
        MerchantReward {
            id,
            kind: MerchantRewardKind::Gems,
            name: "Gem Reward".to_string(),
            description: "A pouch of gems".to_string(),
            coins: 0,
            gems: rng.gen_range(MERCHANT_GEMS_MIN..=MERCHANT_GEMS_MAX),
        }
    }
}

/// Trade five fragments for three reward offers.
pub fn spend_fragments(
    state: &mut GameState,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, Rejection> {
    let available = state.merchant.hugoland_fragments;
    if available < FRAGMENTS_PER_EXCHANGE {
        return Err(Rejection::InsufficientFragments {
            needed: FRAGMENTS_PER_EXCHANGE,
            available,
        });
    }

    let offers: Vec<MerchantReward> = (0..MERCHANT_OFFER_COUNT)
        .map(|_| roll_reward(rng))
        .collect();

    let merchant = &mut state.merchant;
    merchant.hugoland_fragments -= FRAGMENTS_PER_EXCHANGE;
    merchant.show_reward_modal = true;
    merchant.available_rewards = offers;

    Ok(vec![GameEvent::MerchantOffersReady {
        count: MERCHANT_OFFER_COUNT,
    }])
}

/// Claim one of the pending offers; the others are forfeited.
pub fn select_merchant_reward(
    state: &mut GameState,
    reward_id: &str,
) -> Result<Vec<GameEvent>, Rejection> {
    let reward = state
        .merchant
        .available_rewards
        .iter()
        .find(|r| r.id == reward_id)
        .cloned()
        .ok_or_else(|| Rejection::UnknownReward(reward_id.to_string()))?;

    state.coins = state.coins.saturating_add(reward.coins);
    state.gems = state.gems.saturating_add(reward.gems);
    state.merchant.show_reward_modal = false;
    state.merchant.available_rewards.clear();

    Ok(vec![GameEvent::MerchantRewardClaimed {
        reward_id: reward.id,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_only_on_interval_zones() {
        let mut merchant = Merchant::default();
        assert!(!merchant.award_fragment(4));
        assert!(merchant.award_fragment(5));
        assert_eq!(merchant.hugoland_fragments, 1);
        assert_eq!(merchant.last_fragment_zone, 5);
    }

    #[test]
    fn test_fragment_not_paid_twice_for_same_zone() {
        let mut merchant = Merchant::default();
        assert!(merchant.award_fragment(10));
        assert!(!merchant.award_fragment(10));
        assert!(!merchant.award_fragment(5));
        assert!(merchant.award_fragment(15));
        assert_eq!(merchant.total_fragments_earned, 2);
    }
}
