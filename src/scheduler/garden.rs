//! Garden of Growth: a plant that grows one centimetre per watered hour.

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::economy::wallet::spend_coins;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenOfGrowth {
    pub is_planted: bool,
    pub planted_at: Option<i64>,
    pub last_watered: Option<i64>,
    /// Start of the first hour not yet credited to growth.
    #[serde(default)]
    pub last_growth_at: Option<i64>,
    pub water_hours_remaining: u32,
    pub growth_cm: f64,
    /// Percent bonus derived from `growth_cm`.
    pub total_growth_bonus: f64,
    pub seed_cost: u64,
    pub water_cost: u64,
    pub max_growth_cm: f64,
}

impl Default for GardenOfGrowth {
    fn default() -> Self {
        Self {
            is_planted: false,
            planted_at: None,
            last_watered: None,
            last_growth_at: None,
            water_hours_remaining: 0,
            growth_cm: 0.0,
            total_growth_bonus: 0.0,
            seed_cost: GARDEN_SEED_COST,
            water_cost: GARDEN_WATER_COST,
            max_growth_cm: GARDEN_MAX_GROWTH_CM,
        }
    }
}

pub fn plant_seed(state: &mut GameState, now: i64) -> Result<Vec<GameEvent>, Rejection> {
    if state.garden_of_growth.is_planted {
        return Err(Rejection::AlreadyPlanted);
    }
    let cost = state.garden_of_growth.seed_cost;
    spend_coins(state, cost)?;

    let garden = &mut state.garden_of_growth;
    garden.is_planted = true;
    garden.planted_at = Some(now);
    garden.last_watered = Some(now);
    garden.last_growth_at = Some(now);
    garden.water_hours_remaining = GARDEN_STARTING_WATER_HOURS;
    Ok(vec![GameEvent::SeedPlanted])
}

pub fn buy_water(state: &mut GameState, hours: u32, now: i64) -> Result<Vec<GameEvent>, Rejection> {
    if hours == 0 {
        return Err(Rejection::InvalidAmount);
    }
    let cost = state.garden_of_growth.water_cost;
    spend_coins(state, cost)?;

    let garden = &mut state.garden_of_growth;
    garden.water_hours_remaining = garden.water_hours_remaining.saturating_add(hours);
    garden.last_watered = Some(now);
    Ok(vec![GameEvent::WaterPurchased { hours }])
}

/// Credit every whole hour elapsed since the last check. Each watered hour
/// grows the plant and drinks one water hour; dry hours pass without growth.
pub fn grow_garden(state: &mut GameState, now: i64) -> Vec<GameEvent> {
    let garden = &mut state.garden_of_growth;
    if !garden.is_planted {
        return Vec::new();
    }
    let since = garden.last_growth_at.or(garden.planted_at).unwrap_or(now);
    let elapsed_hours = (now - since).max(0) / SECONDS_PER_HOUR;
    if elapsed_hours == 0 {
        return Vec::new();
    }
    garden.last_growth_at = Some(since + elapsed_hours * SECONDS_PER_HOUR);

    let watered = (elapsed_hours as u64).min(garden.water_hours_remaining as u64) as u32;
    garden.water_hours_remaining -= watered;
    let before = garden.growth_cm;
    garden.growth_cm =
        (garden.growth_cm + watered as f64 * GARDEN_GROWTH_CM_PER_HOUR).min(garden.max_growth_cm);
    garden.total_growth_bonus = garden.growth_cm * GARDEN_BONUS_PER_CM;

    if garden.growth_cm > before {
        vec![GameEvent::GardenGrew {
            growth_cm: garden.growth_cm,
        }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::StandardContent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rich_state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.coins = 5000;
        state
    }

    #[test]
    fn test_plant_seed_charges_and_waters() {
        let mut state = rich_state();
        plant_seed(&mut state, 100).unwrap();
        assert_eq!(state.coins, 4000);
        assert!(state.garden_of_growth.is_planted);
        assert_eq!(state.garden_of_growth.water_hours_remaining, 24);
    }

    #[test]
    fn test_plant_twice_rejected() {
        let mut state = rich_state();
        plant_seed(&mut state, 0).unwrap();
        assert_eq!(plant_seed(&mut state, 0), Err(Rejection::AlreadyPlanted));
        assert_eq!(state.coins, 4000);
    }

    #[test]
    fn test_growth_per_whole_hour() {
        let mut state = rich_state();
        plant_seed(&mut state, 0).unwrap();

        grow_garden(&mut state, 3 * 3600 + 1800);
        assert_eq!(state.garden_of_growth.growth_cm, 3.0);
        assert_eq!(state.garden_of_growth.water_hours_remaining, 21);
        assert_eq!(state.garden_of_growth.total_growth_bonus, 1.5);

        // The half hour carried over completes at 4h.
        grow_garden(&mut state, 4 * 3600);
        assert_eq!(state.garden_of_growth.growth_cm, 4.0);
    }

    #[test]
    fn test_growth_idempotent_within_hour() {
        let mut state = rich_state();
        plant_seed(&mut state, 0).unwrap();
        grow_garden(&mut state, 7200);
        let once = state.garden_of_growth.clone();
        grow_garden(&mut state, 7200 + 59);
        assert_eq!(state.garden_of_growth, once);
    }

    #[test]
    fn test_growth_stops_without_water() {
        let mut state = rich_state();
        plant_seed(&mut state, 0).unwrap();
        grow_garden(&mut state, 48 * 3600);
        assert_eq!(state.garden_of_growth.growth_cm, 24.0);
        assert_eq!(state.garden_of_growth.water_hours_remaining, 0);
    }

    #[test]
    fn test_growth_capped() {
        let mut state = rich_state();
        plant_seed(&mut state, 0).unwrap();
        state.garden_of_growth.water_hours_remaining = 1000;
        grow_garden(&mut state, 500 * 3600);
        assert_eq!(state.garden_of_growth.growth_cm, 100.0);
    }
}
