//! Checked currency spending. Balances never go negative; a failed check
//! leaves the state untouched.

use crate::core::error::Rejection;
use crate::core::game_state::GameState;

pub fn can_afford_coins(state: &GameState, amount: u64) -> Result<(), Rejection> {
    if state.cheats.infinite_coins || state.coins >= amount {
        Ok(())
    } else {
        Err(Rejection::InsufficientCoins {
            needed: amount,
            available: state.coins,
        })
    }
}

pub fn can_afford_gems(state: &GameState, amount: u64) -> Result<(), Rejection> {
    if state.cheats.infinite_gems || state.gems >= amount {
        Ok(())
    } else {
        Err(Rejection::InsufficientGems {
            needed: amount,
            available: state.gems,
        })
    }
}

/// Deduct coins, unless the infinite-coins cheat is on.
pub fn spend_coins(state: &mut GameState, amount: u64) -> Result<(), Rejection> {
    can_afford_coins(state, amount)?;
    if !state.cheats.infinite_coins {
        state.coins -= amount;
    }
    Ok(())
}

pub fn spend_gems(state: &mut GameState, amount: u64) -> Result<(), Rejection> {
    can_afford_gems(state, amount)?;
    if !state.cheats.infinite_gems {
        state.gems -= amount;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::StandardContent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        GameState::new(0, &StandardContent, &mut rng)
    }

    #[test]
    fn test_spend_coins_rejects_overdraft() {
        let mut state = state();
        let err = spend_coins(&mut state, 501).unwrap_err();
        assert_eq!(
            err,
            Rejection::InsufficientCoins {
                needed: 501,
                available: 500
            }
        );
        assert_eq!(state.coins, 500);
    }

    #[test]
    fn test_spend_gems_deducts() {
        let mut state = state();
        spend_gems(&mut state, 20).unwrap();
        assert_eq!(state.gems, 30);
    }

    #[test]
    fn test_infinite_coins_cheat_skips_deduction() {
        let mut state = state();
        state.cheats.infinite_coins = true;
        spend_coins(&mut state, 10_000).unwrap();
        assert_eq!(state.coins, 500);
    }
}
