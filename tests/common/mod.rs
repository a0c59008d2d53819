//! Shared fixtures for integration tests.
#![allow(dead_code)]

use hugoland::combat::Enemy;
use hugoland::core::{apply, GameAction, GameState, Transition};
use hugoland::items::{Armor, ContentGenerator, Rarity, RelicItem, Weapon};
use hugoland::skills::{AdventureSkill, AdventureSkillType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const NOW: i64 = 1_704_110_400;

/// Content with fixed numbers so scenarios can be computed by hand.
#[derive(Debug, Clone, Copy)]
pub struct FixedContent {
    pub enemy_hp: u32,
    pub enemy_atk: u32,
    pub enemy_def: u32,
    pub gear_stat: u32,
    pub relic_cost: u64,
}

impl Default for FixedContent {
    fn default() -> Self {
        Self {
            enemy_hp: 15,
            enemy_atk: 5,
            enemy_def: 0,
            gear_stat: 30,
            relic_cost: 60,
        }
    }
}

impl FixedContent {
    pub fn enemy(hp: u32, atk: u32, def: u32) -> Self {
        Self {
            enemy_hp: hp,
            enemy_atk: atk,
            enemy_def: def,
            ..Self::default()
        }
    }
}

impl ContentGenerator for FixedContent {
    fn generate_weapon<R: Rng>(&self, _is_chest: bool, rarity: Rarity, rng: &mut R) -> Weapon {
        Weapon {
            id: format!("w-{}", rng.gen::<u32>()),
            name: "Test Sword".to_string(),
            rarity,
            level: 1,
            base_atk: self.gear_stat,
            upgrade_cost: 10,
            sell_price: 25,
        }
    }

    fn generate_armor<R: Rng>(&self, _is_chest: bool, rarity: Rarity, rng: &mut R) -> Armor {
        Armor {
            id: format!("a-{}", rng.gen::<u32>()),
            name: "Test Plate".to_string(),
            rarity,
            level: 1,
            base_def: self.gear_stat,
            upgrade_cost: 10,
            sell_price: 25,
        }
    }

    fn generate_enemy<R: Rng>(&self, zone: u32, _rng: &mut R) -> Enemy {
        Enemy::new(
            "Training Dummy".to_string(),
            zone,
            self.enemy_hp,
            self.enemy_atk,
            self.enemy_def,
        )
    }

    fn generate_relic_item<R: Rng>(&self, rng: &mut R) -> RelicItem {
        RelicItem {
            id: format!("r-{}", rng.gen::<u32>()),
            name: "Test Relic".to_string(),
            description: String::new(),
            rarity: Rarity::Legendary,
            level: 1,
            cost: self.relic_cost,
            base_atk: Some(self.gear_stat),
            base_def: None,
            upgrade_cost: self.relic_cost / 2,
        }
    }

    fn chest_rarity_weights(&self, _cost: u64) -> [u32; 5] {
        [100, 0, 0, 0, 0]
    }
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn fresh_state(content: &FixedContent, rng: &mut ChaCha8Rng) -> GameState {
    GameState::new(NOW, content, rng)
}

/// Apply and assert the action was accepted.
pub fn accept(
    state: &GameState,
    action: GameAction,
    content: &FixedContent,
    rng: &mut ChaCha8Rng,
) -> Transition {
    let t = apply(state, &action, NOW, content, rng);
    assert!(t.accepted, "{:?} rejected: {:?}", action, t.rejection);
    t
}

/// Start a run with `skill` forced into the first offer slot and select it.
pub fn enter_combat_with(
    state: &GameState,
    skill: Option<AdventureSkillType>,
    content: &FixedContent,
    rng: &mut ChaCha8Rng,
) -> GameState {
    let mut state = accept(state, GameAction::StartCombat, content, rng).state;
    let action = match skill {
        Some(skill_type) => {
            let id = state.adventure_skills.available_skills[0].id.clone();
            state.adventure_skills.available_skills[0] =
                AdventureSkill::new(id.clone(), skill_type);
            GameAction::SelectAdventureSkill { skill_id: id }
        }
        None => GameAction::SkipAdventureSkills,
    };
    accept(&state, action, content, rng).state
}

pub fn answer(
    state: &GameState,
    hit: bool,
    content: &FixedContent,
    rng: &mut ChaCha8Rng,
) -> Transition {
    accept(
        state,
        GameAction::Attack {
            hit,
            category: None,
        },
        content,
        rng,
    )
}
