//! The state transition engine.
//!
//! `apply` is the only writer of [`GameState`]: it works on a clone of the
//! snapshot, dispatches one [`GameAction`], enforces the aggregate's
//! invariants and returns the next snapshot. A rejected action returns the
//! input snapshot untouched.

use super::error::Rejection;
use super::events::GameEvent;
use super::game_state::{CheatKind, GameModeKind, GameState, KnowledgeStreak, SettingsPatch};
use crate::character::{prestige, set_experience, upgrade_skill};
use crate::combat::{
    attack, revive_at_checkpoint, select_adventure_skill, skip_adventure_skills, start_combat,
    use_skip_card,
};
use crate::economy::{
    exchange_shiny_gems, mine_gem, open_chest, purchase_mythical, select_merchant_reward,
    spend_fragments,
};
use crate::items::generation::ContentGenerator;
use crate::items::types::GearKind;
use crate::items::{
    bulk_sell, bulk_upgrade, discard_item, equip_armor, equip_relic, equip_weapon,
    purchase_relic, sell_gear, sell_relic, unequip_relic, upgrade_gear, upgrade_relic,
};
use crate::scheduler::{
    buy_water, claim_daily_reward, claim_offline_rewards, plant_seed, poll_timers,
};
use crate::skills::purchase_menu_skill;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One external event fed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GameAction {
    // ── Combat ──────────────────────────────────────────────────
    StartCombat,
    SelectAdventureSkill { skill_id: String },
    SkipAdventureSkills,
    /// One answered question.
    Attack {
        hit: bool,
        #[serde(default)]
        category: Option<String>,
    },
    UseSkipCard,
    ReviveAtCheckpoint,

    // ── Gear ────────────────────────────────────────────────────
    EquipWeapon { id: String },
    EquipArmor { id: String },
    UpgradeWeapon { id: String },
    UpgradeArmor { id: String },
    SellWeapon { id: String },
    SellArmor { id: String },
    DiscardItem { id: String, kind: GearKind },
    BulkSell { ids: Vec<String>, kind: GearKind },
    BulkUpgrade { ids: Vec<String>, kind: GearKind },

    // ── Shop ────────────────────────────────────────────────────
    OpenChest { cost: u64 },
    PurchaseMythical { cost: u64 },

    // ── Relics ──────────────────────────────────────────────────
    PurchaseRelic { id: String },
    UpgradeRelic { id: String },
    EquipRelic { id: String },
    UnequipRelic { id: String },
    SellRelic { id: String },

    // ── Mining ──────────────────────────────────────────────────
    MineGem,
    ExchangeShinyGems { amount: u64 },

    // ── Meta ────────────────────────────────────────────────────
    ClaimDailyReward,
    ClaimOfflineRewards,
    UpgradeSkill { skill_id: String },
    Prestige,
    RollMenuSkill,
    SpendFragments,
    SelectMerchantReward { reward_id: String },
    PlantSeed,
    BuyWater { hours: u32 },

    // ── Preferences / debug ─────────────────────────────────────
    UpdateSettings { patch: SettingsPatch },
    SetGameMode { mode: GameModeKind },
    ToggleCheat { cheat: CheatKind },
    AddCoins { amount: u64 },
    AddGems { amount: u64 },
    TeleportToZone { zone: u32 },
    SetExperience { experience: u64 },

    // ── Lifecycle ───────────────────────────────────────────────
    /// Run the timed subsystem checks.
    Tick,
    ResetGame,
}

impl GameAction {
    /// Timer polls are the only actions a background driver sends.
    pub fn is_tick(&self) -> bool {
        matches!(self, GameAction::Tick)
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub accepted: bool,
    pub rejection: Option<Rejection>,
    pub events: Vec<GameEvent>,
}

/// Apply one action to a snapshot.
pub fn apply<C: ContentGenerator, R: Rng>(
    snapshot: &GameState,
    action: &GameAction,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Transition {
    let mut state = snapshot.clone();
    match dispatch(&mut state, action, now, content, rng) {
        Ok(events) => {
            enforce_invariants(&mut state);
            Transition {
                state,
                accepted: true,
                rejection: None,
                events,
            }
        }
        Err(rejection) => {
            log::debug!("rejected {:?}: {}", action, rejection);
            Transition {
                state: snapshot.clone(),
                accepted: false,
                rejection: Some(rejection),
                events: Vec::new(),
            }
        }
    }
}

fn dispatch<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    action: &GameAction,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    match action {
        GameAction::StartCombat => start_combat(state, now, rng),
        GameAction::SelectAdventureSkill { skill_id } => {
            select_adventure_skill(state, skill_id, content, rng)
        }
        GameAction::SkipAdventureSkills => skip_adventure_skills(state, content, rng),
        GameAction::Attack { hit, category } => {
            attack(state, *hit, category.as_deref(), now, rng)
        }
        GameAction::UseSkipCard => use_skip_card(state, now, rng),
        GameAction::ReviveAtCheckpoint => revive_at_checkpoint(state),

        GameAction::EquipWeapon { id } => equip_weapon(state, id),
        GameAction::EquipArmor { id } => equip_armor(state, id),
        GameAction::UpgradeWeapon { id } => upgrade_gear(state, GearKind::Weapon, id),
        GameAction::UpgradeArmor { id } => upgrade_gear(state, GearKind::Armor, id),
        GameAction::SellWeapon { id } => sell_gear(state, GearKind::Weapon, id),
        GameAction::SellArmor { id } => sell_gear(state, GearKind::Armor, id),
        GameAction::DiscardItem { id, kind } => discard_item(state, *kind, id),
        GameAction::BulkSell { ids, kind } => bulk_sell(state, *kind, ids),
        GameAction::BulkUpgrade { ids, kind } => bulk_upgrade(state, *kind, ids),

        GameAction::OpenChest { cost } => open_chest(state, *cost, content, rng),
        GameAction::PurchaseMythical { cost } => purchase_mythical(state, *cost, content, rng),

        GameAction::PurchaseRelic { id } => purchase_relic(state, id),
        GameAction::UpgradeRelic { id } => upgrade_relic(state, id),
        GameAction::EquipRelic { id } => equip_relic(state, id),
        GameAction::UnequipRelic { id } => unequip_relic(state, id),
        GameAction::SellRelic { id } => sell_relic(state, id),

        GameAction::MineGem => Ok(mine_gem(state, rng)),
        GameAction::ExchangeShinyGems { amount } => exchange_shiny_gems(state, *amount),

        GameAction::ClaimDailyReward => claim_daily_reward(state, now),
        GameAction::ClaimOfflineRewards => Ok(claim_offline_rewards(state)),
        GameAction::UpgradeSkill { skill_id } => upgrade_skill(state, skill_id),
        GameAction::Prestige => prestige(state),
        GameAction::RollMenuSkill => purchase_menu_skill(state, now, rng),
        GameAction::SpendFragments => spend_fragments(state, rng),
        GameAction::SelectMerchantReward { reward_id } => select_merchant_reward(state, reward_id),
        GameAction::PlantSeed => plant_seed(state, now),
        GameAction::BuyWater { hours } => buy_water(state, *hours, now),

        GameAction::UpdateSettings { patch } => {
            state.settings.apply(patch.clone());
            Ok(vec![GameEvent::SettingsUpdated])
        }
        GameAction::SetGameMode { mode } => {
            let game_mode = &mut state.game_mode;
            game_mode.current = *mode;
            if *mode == GameModeKind::Survival {
                game_mode.survival_lives = game_mode.max_survival_lives;
            }
            Ok(vec![GameEvent::GameModeChanged { mode: *mode }])
        }
        GameAction::ToggleCheat { cheat } => {
            state.cheats.toggle(*cheat);
            Ok(vec![GameEvent::CheatToggled { cheat: *cheat }])
        }
        GameAction::AddCoins { amount } => {
            state.coins = state.coins.saturating_add(*amount);
            Ok(vec![GameEvent::CurrencyGranted {
                coins: *amount,
                gems: 0,
            }])
        }
        GameAction::AddGems { amount } => {
            state.gems = state.gems.saturating_add(*amount);
            Ok(vec![GameEvent::CurrencyGranted {
                coins: 0,
                gems: *amount,
            }])
        }
        GameAction::TeleportToZone { zone } => {
            state.zone = (*zone).max(1);
            Ok(vec![GameEvent::Teleported { zone: state.zone }])
        }
        GameAction::SetExperience { experience } => Ok(set_experience(state, *experience)),

        GameAction::Tick => Ok(poll_timers(state, now, content, rng)),
        GameAction::ResetGame => {
            *state = GameState::new(now, content, rng);
            Ok(vec![GameEvent::GameReset])
        }
    }
}

/// Restore the aggregate's invariants after a transition.
pub fn enforce_invariants(state: &mut GameState) {
    let stats = &mut state.player_stats;
    stats.hp = stats.hp.min(stats.max_hp);

    if let Some(enemy) = state.current_enemy.as_mut() {
        enemy.hp = enemy.hp.min(enemy.max_hp);
    }
    if !state.in_combat {
        state.current_enemy = None;
    } else if state.current_enemy.is_none() {
        state.in_combat = false;
    }

    let streak = &mut state.knowledge_streak;
    streak.multiplier = KnowledgeStreak::multiplier_for(streak.current);
    streak.best = streak.best.max(streak.current);

    state.zone = state.zone.max(1);
}
