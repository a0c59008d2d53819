//! Relics bought from the Yojef market.

use super::inventory::ensure_removable;
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::{GameState, PlayerStats};
use crate::economy::rewards::{next_upgrade_cost, relic_sell_value};
use crate::economy::wallet::spend_gems;
use crate::items::types::RelicItem;

fn add_contribution(stats: &mut PlayerStats, relic: &RelicItem) {
    stats.atk = stats.atk.saturating_add(relic.base_atk.unwrap_or(0));
    stats.def = stats.def.saturating_add(relic.base_def.unwrap_or(0));
}

fn remove_contribution(stats: &mut PlayerStats, relic: &RelicItem) {
    stats.atk = stats.atk.saturating_sub(relic.base_atk.unwrap_or(0));
    stats.def = stats.def.saturating_sub(relic.base_def.unwrap_or(0));
}

/// Buy a market relic for its gem cost. Bought relics are equipped straight away.
pub fn purchase_relic(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let index = state
        .yojef_market
        .items
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    let cost = state.yojef_market.items[index].cost;
    spend_gems(state, cost)?;

    let relic = state.yojef_market.items.remove(index);
    add_contribution(&mut state.player_stats, &relic);
    state.inventory.equipped_relics.push(relic.id.clone());
    state.inventory.relics.push(relic);

    Ok(vec![
        GameEvent::RelicPurchased { id: id.to_string() },
        GameEvent::ItemEquipped { id: id.to_string() },
    ])
}

pub fn upgrade_relic(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let cost = state
        .inventory
        .relic(id)
        .map(|r| r.upgrade_cost)
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    spend_gems(state, cost)?;

    let equipped = state.inventory.is_relic_equipped(id);
    let Some(relic) = state.inventory.relics.iter_mut().find(|r| r.id == id) else {
        return Err(Rejection::UnknownItem(id.to_string()));
    };
    let atk_gain = relic.base_atk.map_or(0, |_| RELIC_ATK_PER_UPGRADE);
    let def_gain = relic.base_def.map_or(0, |_| RELIC_DEF_PER_UPGRADE);
    relic.level += 1;
    relic.base_atk = relic.base_atk.map(|v| v.saturating_add(atk_gain));
    relic.base_def = relic.base_def.map(|v| v.saturating_add(def_gain));
    relic.upgrade_cost = next_upgrade_cost(relic.upgrade_cost);
    let level = relic.level;

    if equipped {
        let stats = &mut state.player_stats;
        stats.atk = stats.atk.saturating_add(atk_gain);
        stats.def = stats.def.saturating_add(def_gain);
    }
    state.statistics.items_upgraded += 1;

    Ok(vec![GameEvent::ItemUpgraded {
        id: id.to_string(),
        level,
    }])
}

pub fn equip_relic(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let relic = state
        .inventory
        .relic(id)
        .cloned()
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    if state.inventory.is_relic_equipped(id) {
        return Err(Rejection::AlreadyEquipped(id.to_string()));
    }
    add_contribution(&mut state.player_stats, &relic);
    state.inventory.equipped_relics.push(relic.id);
    Ok(vec![GameEvent::ItemEquipped { id: id.to_string() }])
}

pub fn unequip_relic(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    if !state.inventory.is_relic_equipped(id) {
        return Err(Rejection::NotEquipped(id.to_string()));
    }
    if let Some(relic) = state.inventory.relic(id).cloned() {
        remove_contribution(&mut state.player_stats, &relic);
    }
    state.inventory.equipped_relics.retain(|r| r != id);
    Ok(vec![GameEvent::ItemUnequipped { id: id.to_string() }])
}

/// Sell an unequipped relic back for half its purchase cost in gems.
pub fn sell_relic(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    ensure_removable(&state.inventory, None, id)?;
    let gems = state.inventory.relic(id).map_or(0, |r| relic_sell_value(r.cost));
    state.inventory.relics.retain(|r| r.id != id);
    state.gems = state.gems.saturating_add(gems);
    state.statistics.items_sold += 1;
    Ok(vec![GameEvent::ItemSold {
        id: id.to_string(),
        coins: 0,
        gems,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::StandardContent;
    use crate::items::types::Rarity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn relic(id: &str, atk: Option<u32>, def: Option<u32>) -> RelicItem {
        RelicItem {
            id: id.to_string(),
            name: "Blade of Yojef".to_string(),
            description: String::new(),
            rarity: Rarity::Legendary,
            level: 1,
            cost: 80,
            base_atk: atk,
            base_def: def,
            upgrade_cost: 40,
        }
    }

    fn state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.yojef_market.items = vec![relic("r1", Some(70), None), relic("r2", None, Some(50))];
        state.gems = 500;
        state
    }

    #[test]
    fn test_purchase_moves_relic_and_equips() {
        let mut state = state();
        purchase_relic(&mut state, "r1").unwrap();
        assert_eq!(state.gems, 420);
        assert_eq!(state.yojef_market.items.len(), 1);
        assert!(state.inventory.is_relic_equipped("r1"));
        assert_eq!(state.player_stats.atk, 90);
    }

    #[test]
    fn test_purchase_unknown_relic_rejected() {
        let mut state = state();
        assert_eq!(
            purchase_relic(&mut state, "nope"),
            Err(Rejection::UnknownItem("nope".to_string()))
        );
    }

    #[test]
    fn test_upgrade_only_grows_defined_stat() {
        let mut state = state();
        purchase_relic(&mut state, "r2").unwrap();
        upgrade_relic(&mut state, "r2").unwrap();
        let r2 = state.inventory.relic("r2").unwrap();
        assert_eq!(r2.base_def, Some(65));
        assert_eq!(r2.base_atk, None);
        assert_eq!(r2.upgrade_cost, 60);
        assert_eq!(state.player_stats.def, 10 + 65);
        assert_eq!(state.player_stats.atk, 20);
    }

    #[test]
    fn test_sell_requires_unequip_first() {
        let mut state = state();
        purchase_relic(&mut state, "r1").unwrap();
        assert_eq!(
            sell_relic(&mut state, "r1"),
            Err(Rejection::ItemEquipped("r1".to_string()))
        );

        unequip_relic(&mut state, "r1").unwrap();
        assert_eq!(state.player_stats.atk, 20);
        sell_relic(&mut state, "r1").unwrap();
        assert_eq!(state.gems, 420 + 40);
        assert!(state.inventory.relics.is_empty());
    }

    #[test]
    fn test_equip_twice_rejected() {
        let mut state = state();
        purchase_relic(&mut state, "r1").unwrap();
        assert_eq!(
            equip_relic(&mut state, "r1"),
            Err(Rejection::AlreadyEquipped("r1".to_string()))
        );
        assert_eq!(state.player_stats.atk, 90);
    }
}
