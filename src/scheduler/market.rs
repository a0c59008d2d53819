//! Yojef market: a relic shop whose stock rotates every five minutes.

use crate::core::constants::*;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::items::generation::ContentGenerator;
use crate::items::types::RelicItem;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YojefMarket {
    pub items: Vec<RelicItem>,
    pub last_refresh: i64,
    pub next_refresh: i64,
}

impl YojefMarket {
    pub fn stocked(items: Vec<RelicItem>, now: i64) -> Self {
        Self {
            items,
            last_refresh: now,
            next_refresh: now + MARKET_REFRESH_SECONDS,
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        now >= self.next_refresh
    }
}

/// A fresh batch of three to five relic offers.
pub fn generate_market_items<C: ContentGenerator, R: Rng>(
    content: &C,
    rng: &mut R,
) -> Vec<RelicItem> {
    let count = rng.gen_range(MARKET_MIN_ITEMS..=MARKET_MAX_ITEMS);
    (0..count).map(|_| content.generate_relic_item(rng)).collect()
}

/// Replace all unsold stock once the deadline has passed.
///
/// Polled on a coarse interval, so a rotation may land up to one poll late;
/// the new window starts at the poll time, not the missed deadline.
pub fn refresh_market_if_due<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Vec<GameEvent> {
    if !state.yojef_market.is_due(now) {
        return Vec::new();
    }
    restock_market(state, now, content, rng)
}

/// Unconditional rotation, used after load when the stock is empty.
pub fn restock_market<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Vec<GameEvent> {
    state.yojef_market = YojefMarket::stocked(generate_market_items(content, rng), now);
    let items = state.yojef_market.items.len();
    log::info!("yojef market rotated: {items} relics");
    vec![GameEvent::MarketRefreshed { items }]
}
