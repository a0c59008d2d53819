//! Chests, the mythical shop, gem mining and the shiny-gem exchange.

use super::wallet::spend_coins;
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::items::generation::{roll_rarity, ContentGenerator};
use crate::items::types::{Armor, ChestReward, Rarity, Weapon};
use rand::Rng;

fn record_weapon(state: &mut GameState, weapon: &Weapon) {
    let book = &mut state.collection_book;
    if book.weapons.insert(weapon.name.clone(), true).is_none() {
        book.total_weapons_found += 1;
    }
    book.rarity_stats.record(weapon.rarity);
    state.statistics.items_collected += 1;
}

fn record_armor(state: &mut GameState, armor: &Armor) {
    let book = &mut state.collection_book;
    if book.armor.insert(armor.name.clone(), true).is_none() {
        book.total_armor_found += 1;
    }
    book.rarity_stats.record(armor.rarity);
    state.statistics.items_collected += 1;
}

/// Add a fresh weapon or armor piece (50/50) of the given rarity to the inventory.
fn grant_gear<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    rarity: Rarity,
    bonus_gems: u64,
    content: &C,
    rng: &mut R,
) -> ChestReward {
    if rng.gen_bool(0.5) {
        let item = content.generate_weapon(false, rarity, rng);
        record_weapon(state, &item);
        state.inventory.weapons.push(item.clone());
        ChestReward::Weapon { item, bonus_gems }
    } else {
        let item = content.generate_armor(false, rarity, rng);
        record_armor(state, &item);
        state.inventory.armor.push(item.clone());
        ChestReward::Armor { item, bonus_gems }
    }
}

/// Pay `cost` coins for a random item whose rarity odds depend on the price.
pub fn open_chest<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    cost: u64,
    content: &C,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    spend_coins(state, cost)?;

    let weights = content.chest_rarity_weights(cost);
    let rarity = roll_rarity(&weights, rng);
    let bonus_gems = rng.gen_range(CHEST_BONUS_GEMS_MIN..=CHEST_BONUS_GEMS_MAX);
    let reward = grant_gear(state, rarity, bonus_gems, content, rng);

    state.gems = state.gems.saturating_add(bonus_gems);
    state.statistics.chests_opened += 1;

    Ok(vec![GameEvent::ChestOpened { reward }])
}

/// Pay `cost` coins for a guaranteed mythical item.
pub fn purchase_mythical<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    cost: u64,
    content: &C,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    spend_coins(state, cost)?;
    let reward = grant_gear(state, Rarity::Mythical, 0, content, rng);
    Ok(vec![GameEvent::MythicalPurchased {
        id: reward.item_id().to_string(),
        kind: reward.kind(),
    }])
}

/// One swing of the pickaxe: a shiny gem 5% of the time, otherwise one gem.
pub fn mine_gem(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let shiny = rng.gen::<f64>() < SHINY_GEM_MINE_CHANCE;
    if shiny {
        state.shiny_gems = state.shiny_gems.saturating_add(1);
        state.mining.total_shiny_gems_mined += 1;
        state.statistics.shiny_gems_earned += 1;
    } else {
        state.gems = state.gems.saturating_add(1);
        state.mining.total_gems_mined += 1;
    }
    vec![GameEvent::GemMined { shiny }]
}

pub fn exchange_shiny_gems(
    state: &mut GameState,
    amount: u64,
) -> Result<Vec<GameEvent>, Rejection> {
    if amount == 0 {
        return Err(Rejection::InvalidAmount);
    }
    if state.shiny_gems < amount {
        return Err(Rejection::InsufficientShinyGems {
            needed: amount,
            available: state.shiny_gems,
        });
    }
    let gems = amount.saturating_mul(SHINY_GEM_EXCHANGE_RATE);
    state.shiny_gems -= amount;
    state.gems = state.gems.saturating_add(gems);
    Ok(vec![GameEvent::ShinyGemsExchanged {
        shiny_gems: amount,
        gems,
    }])
}
