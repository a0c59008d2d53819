//! Integration test: aggregate invariants under random action streams
//!
//! Drives the real content generator with a seeded RNG through thousands of
//! mixed actions and checks the invariants after every transition.

use hugoland::core::{apply, GameAction, GameState, KnowledgeStreak};
use hugoland::items::{GearKind, StandardContent};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_action(state: &GameState, rng: &mut ChaCha8Rng) -> GameAction {
    let weapon = state.inventory.weapons.choose(rng).map(|w| w.id.clone());
    let armor = state.inventory.armor.choose(rng).map(|a| a.id.clone());
    let relic = state.yojef_market.items.choose(rng).map(|r| r.id.clone());
    let owned_relic = state.inventory.relics.choose(rng).map(|r| r.id.clone());
    let offer = state
        .adventure_skills
        .available_skills
        .choose(rng)
        .map(|s| s.id.clone());
    let id = |o: Option<String>| o.unwrap_or_else(|| "missing".to_string());

    match rng.gen_range(0..24) {
        0..=7 => GameAction::Attack {
            hit: rng.gen_bool(0.7),
            category: Some("science".to_string()),
        },
        8 => GameAction::StartCombat,
        9 => GameAction::SelectAdventureSkill { skill_id: id(offer) },
        10 => GameAction::SkipAdventureSkills,
        11 => GameAction::ReviveAtCheckpoint,
        12 => GameAction::OpenChest { cost: 100 },
        13 => GameAction::EquipWeapon { id: id(weapon.clone()) },
        14 => GameAction::UpgradeArmor { id: id(armor.clone()) },
        15 => GameAction::SellWeapon { id: id(weapon) },
        16 => GameAction::BulkSell {
            ids: state.inventory.armor.iter().map(|a| a.id.clone()).collect(),
            kind: GearKind::Armor,
        },
        17 => GameAction::PurchaseRelic { id: id(relic) },
        18 => GameAction::SellRelic { id: id(owned_relic) },
        19 => GameAction::MineGem,
        20 => GameAction::RollMenuSkill,
        21 => GameAction::UseSkipCard,
        22 => GameAction::EquipArmor { id: id(armor) },
        _ => GameAction::Tick,
    }
}

fn check_invariants(state: &GameState) {
    let stats = &state.player_stats;
    assert!(stats.hp <= stats.max_hp, "hp {} > max {}", stats.hp, stats.max_hp);
    assert_eq!(state.in_combat, state.current_enemy.is_some());
    if let Some(enemy) = &state.current_enemy {
        assert!(enemy.hp <= enemy.max_hp);
        assert!(enemy.hp > 0, "dead enemy left in combat");
    }
    let streak = &state.knowledge_streak;
    assert!((streak.multiplier - KnowledgeStreak::multiplier_for(streak.current)).abs() < 1e-9);
    assert!(streak.best >= streak.current);
    assert!(state.zone >= 1);

    let inventory = &state.inventory;
    if let Some(id) = &inventory.current_weapon {
        assert!(inventory.weapon(id).is_some(), "equipped weapon {id} missing");
    }
    if let Some(id) = &inventory.current_armor {
        assert!(inventory.armor_piece(id).is_some(), "equipped armor {id} missing");
    }
    for id in &inventory.equipped_relics {
        assert!(inventory.relic(id).is_some(), "equipped relic {id} missing");
    }
    if state.yojef_market.last_refresh > 0 {
        assert_eq!(
            state.yojef_market.next_refresh,
            state.yojef_market.last_refresh + 300
        );
    }
}

#[test]
fn test_invariants_hold_under_random_actions() {
    for seed in 0..8u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut now = 1_700_000_000;
        let mut state = GameState::new(now, &StandardContent, &mut rng);
        state.coins = 5_000;
        state.gems = 1_000;

        for _ in 0..1_500 {
            let action = random_action(&state, &mut rng);
            now += rng.gen_range(1..90);
            let t = apply(&state, &action, now, &StandardContent, &mut rng);
            if !t.accepted {
                assert_eq!(t.state, state);
            }
            check_invariants(&t.state);
            state = t.state;
        }
    }
}

#[test]
fn test_rejections_leave_snapshot_untouched() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut state = GameState::new(0, &StandardContent, &mut rng);
    state.coins = 0;
    state.gems = 0;

    let actions = [
        GameAction::OpenChest { cost: 100 },
        GameAction::RollMenuSkill,
        GameAction::PlantSeed,
        GameAction::Prestige,
        GameAction::SpendFragments,
        GameAction::UpgradeSkill {
            skill_id: "power".to_string(),
        },
        GameAction::ExchangeShinyGems { amount: 0 },
        GameAction::UseSkipCard,
        GameAction::SkipAdventureSkills,
        GameAction::ClaimDailyReward,
    ];
    for action in &actions {
        let t = apply(&state, action, 0, &StandardContent, &mut rng);
        assert!(!t.accepted, "{action:?} should be rejected");
        assert!(t.rejection.is_some());
        assert_eq!(t.state, state);
    }
}
