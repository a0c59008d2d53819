//! Serializing the aggregate and rebuilding it from older snapshots.

use super::error::PersistenceError;
use super::store::SnapshotStore;
use crate::core::engine::enforce_invariants;
use crate::core::game_state::GameState;
use crate::items::generation::ContentGenerator;
use crate::scheduler::market::restock_market;
use rand::Rng;
use serde_json::Value;

pub fn serialize_state(state: &GameState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(state)?)
}

pub fn save_state(store: &dyn SnapshotStore, state: &GameState) -> Result<(), PersistenceError> {
    store.save(&serialize_state(state)?)
}

/// Merge `overlay` into `base`: objects key by key, everything else replaced.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Rebuild a state from JSON, filling fields the snapshot lacks from fresh defaults.
pub fn restore_state<C: ContentGenerator, R: Rng>(
    json: &str,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Result<GameState, PersistenceError> {
    let saved: Value = serde_json::from_str(json)?;
    let mut merged = serde_json::to_value(GameState::new(now, content, rng))?;
    deep_merge(&mut merged, saved);

    let mut state: GameState = serde_json::from_value(merged)?;
    enforce_invariants(&mut state);
    if state.yojef_market.items.is_empty() {
        restock_market(&mut state, now, content, rng);
    }
    Ok(state)
}

/// Load the last snapshot, falling back to a fresh game on any failure.
pub fn load_or_default<C: ContentGenerator, R: Rng>(
    store: &dyn SnapshotStore,
    now: i64,
    content: &C,
    rng: &mut R,
) -> GameState {
    let restored = match store.load() {
        Ok(Some(json)) => restore_state(&json, now, content, rng).map(Some),
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    };

    match restored {
        Ok(Some(state)) => {
            log::info!("resumed game at zone {}", state.zone);
            state
        }
        Ok(None) => GameState::new(now, content, rng),
        Err(e) => {
            log::warn!("discarding unreadable snapshot: {}", e);
            GameState::new(now, content, rng)
        }
    }
}
