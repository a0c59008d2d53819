//! Weapon and armor management: equip, upgrade, sell, discard, bulk actions.
//!
//! Equipped slots hold ids. Equipping moves the slot's stat contribution onto
//! the player (removing the old item's share); upgrades of an equipped item
//! add only the increment.

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::economy::rewards::next_upgrade_cost;
use crate::economy::wallet::spend_gems;
use crate::items::types::{GearKind, Inventory};
use std::collections::BTreeSet;

/// Every removal path goes through here: the item must exist and be unequipped.
pub fn ensure_removable(
    inventory: &Inventory,
    kind: Option<GearKind>,
    id: &str,
) -> Result<(), Rejection> {
    let owned = match kind {
        Some(GearKind::Weapon) => inventory.weapon(id).is_some(),
        Some(GearKind::Armor) => inventory.armor_piece(id).is_some(),
        None => inventory.relic(id).is_some(),
    };
    if !owned {
        return Err(Rejection::UnknownItem(id.to_string()));
    }
    if inventory.is_equipped(id) {
        return Err(Rejection::ItemEquipped(id.to_string()));
    }
    Ok(())
}

pub fn equip_weapon(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let inventory = &state.inventory;
    let new_atk = inventory
        .weapon(id)
        .map(|w| w.base_atk)
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    if inventory.current_weapon.as_deref() == Some(id) {
        return Err(Rejection::AlreadyEquipped(id.to_string()));
    }
    let old_atk = inventory.equipped_weapon().map_or(0, |w| w.base_atk);

    let stats = &mut state.player_stats;
    stats.atk = stats.atk.saturating_sub(old_atk).saturating_add(new_atk);
    state.inventory.current_weapon = Some(id.to_string());
    Ok(vec![GameEvent::ItemEquipped { id: id.to_string() }])
}

pub fn equip_armor(state: &mut GameState, id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let inventory = &state.inventory;
    let new_def = inventory
        .armor_piece(id)
        .map(|a| a.base_def)
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    if inventory.current_armor.as_deref() == Some(id) {
        return Err(Rejection::AlreadyEquipped(id.to_string()));
    }
    let old_def = inventory.equipped_armor().map_or(0, |a| a.base_def);

    let stats = &mut state.player_stats;
    stats.def = stats.def.saturating_sub(old_def).saturating_add(new_def);
    state.inventory.current_armor = Some(id.to_string());
    Ok(vec![GameEvent::ItemEquipped { id: id.to_string() }])
}

/// Apply one upgrade step without charging; returns the new level.
fn upgrade_in_place(state: &mut GameState, kind: GearKind, id: &str) -> Option<u32> {
    let equipped = state.inventory.is_equipped(id);
    let level = match kind {
        GearKind::Weapon => {
            let weapon = state.inventory.weapons.iter_mut().find(|w| w.id == id)?;
            weapon.level += 1;
            weapon.base_atk = weapon.base_atk.saturating_add(WEAPON_ATK_PER_UPGRADE);
            weapon.upgrade_cost = next_upgrade_cost(weapon.upgrade_cost);
            if equipped {
                state.player_stats.atk =
                    state.player_stats.atk.saturating_add(WEAPON_ATK_PER_UPGRADE);
            }
            weapon.level
        }
        GearKind::Armor => {
            let armor = state.inventory.armor.iter_mut().find(|a| a.id == id)?;
            armor.level += 1;
            armor.base_def = armor.base_def.saturating_add(ARMOR_DEF_PER_UPGRADE);
            armor.upgrade_cost = next_upgrade_cost(armor.upgrade_cost);
            if equipped {
                state.player_stats.def =
                    state.player_stats.def.saturating_add(ARMOR_DEF_PER_UPGRADE);
            }
            armor.level
        }
    };
    state.statistics.items_upgraded += 1;
    Some(level)
}

fn upgrade_cost_of(inventory: &Inventory, kind: GearKind, id: &str) -> Result<u64, Rejection> {
    match kind {
        GearKind::Weapon => inventory.weapon(id).map(|w| w.upgrade_cost),
        GearKind::Armor => inventory.armor_piece(id).map(|a| a.upgrade_cost),
    }
    .ok_or_else(|| Rejection::UnknownItem(id.to_string()))
}

/// Spend the item's current upgrade cost in gems for one level.
pub fn upgrade_gear(
    state: &mut GameState,
    kind: GearKind,
    id: &str,
) -> Result<Vec<GameEvent>, Rejection> {
    let cost = upgrade_cost_of(&state.inventory, kind, id)?;
    spend_gems(state, cost)?;
    let level = upgrade_in_place(state, kind, id)
        .ok_or_else(|| Rejection::UnknownItem(id.to_string()))?;
    Ok(vec![GameEvent::ItemUpgraded {
        id: id.to_string(),
        level,
    }])
}

fn sell_price_of(inventory: &Inventory, kind: GearKind, id: &str) -> u64 {
    match kind {
        GearKind::Weapon => inventory.weapon(id).map_or(0, |w| w.sell_price),
        GearKind::Armor => inventory.armor_piece(id).map_or(0, |a| a.sell_price),
    }
}

fn remove_gear(inventory: &mut Inventory, kind: GearKind, id: &str) {
    match kind {
        GearKind::Weapon => inventory.weapons.retain(|w| w.id != id),
        GearKind::Armor => inventory.armor.retain(|a| a.id != id),
    }
}

pub fn sell_gear(
    state: &mut GameState,
    kind: GearKind,
    id: &str,
) -> Result<Vec<GameEvent>, Rejection> {
    ensure_removable(&state.inventory, Some(kind), id)?;
    let coins = sell_price_of(&state.inventory, kind, id);
    remove_gear(&mut state.inventory, kind, id);
    state.coins = state.coins.saturating_add(coins);
    state.statistics.items_sold += 1;
    Ok(vec![GameEvent::ItemSold {
        id: id.to_string(),
        coins,
        gems: 0,
    }])
}

pub fn discard_item(
    state: &mut GameState,
    kind: GearKind,
    id: &str,
) -> Result<Vec<GameEvent>, Rejection> {
    ensure_removable(&state.inventory, Some(kind), id)?;
    remove_gear(&mut state.inventory, kind, id);
    Ok(vec![GameEvent::ItemDiscarded {
        id: id.to_string(),
        kind,
    }])
}

fn dedup(ids: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Sell several items at once. Any unknown or equipped id rejects the whole batch.
pub fn bulk_sell(
    state: &mut GameState,
    kind: GearKind,
    ids: &[String],
) -> Result<Vec<GameEvent>, Rejection> {
    let ids = dedup(ids);
    for id in &ids {
        ensure_removable(&state.inventory, Some(kind), id)?;
    }
    let mut events = Vec::with_capacity(ids.len());
    for id in ids {
        events.extend(sell_gear(state, kind, id)?);
    }
    Ok(events)
}

/// Upgrade several items once each, paying the summed cost up front.
/// Nothing is upgraded unless every id resolves and the total is affordable.
pub fn bulk_upgrade(
    state: &mut GameState,
    kind: GearKind,
    ids: &[String],
) -> Result<Vec<GameEvent>, Rejection> {
    let ids = dedup(ids);
    let mut total: u64 = 0;
    for id in &ids {
        total = total.saturating_add(upgrade_cost_of(&state.inventory, kind, id)?);
    }
    spend_gems(state, total)?;

    let mut events = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(level) = upgrade_in_place(state, kind, id) {
            events.push(GameEvent::ItemUpgraded {
                id: id.to_string(),
                level,
            });
        }
    }
    Ok(events)
}
