use crate::core::game_state::{CheatKind, GameModeKind};
use crate::items::types::{ChestReward, GearKind};
use crate::skills::{AdventureSkillType, MenuSkillType};
use serde::{Deserialize, Serialize};

/// Something that happened during one transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Combat ──────────────────────────────────────────────────
    /// Three adventure skills were drawn and the selection round opened.
    SkillsOffered { skills: Vec<AdventureSkillType> },

    SkillSelected { skill: AdventureSkillType },

    SkillsSkipped,

    /// An enemy spawned and combat began.
    EncounterStarted { enemy_name: String, zone: u32 },

    PlayerAttack { damage: u32, was_crit: bool },

    EnemyAttack { damage: u32, enemy_name: String },

    /// A wrong answer's hit was fully negated.
    AttackAvoided { by: AdventureSkillType },

    PlayerHealed { amount: u32 },

    EnemyPoisoned { turns: u32 },

    PoisonTick { damage: u32 },

    EnemyDefeated { enemy_name: String, zone: u32 },

    RewardsGranted { coins: u64, gems: u64, experience: u64 },

    ZoneAdvanced { zone: u32 },

    PremiumUnlocked,

    FragmentFound { fragments: u32 },

    /// The anti-inflation ratchet raised player stats.
    StatsBoosted { atk: u32, def: u32, max_hp: u32 },

    LevelUp { level: u32 },

    PhoenixRevived { hp: u32 },

    PlayerDied,

    RevivedAtCheckpoint { zone: u32, coins_lost: u64, gems_lost: u64 },

    SkipCardUsed,

    // ── Gear ────────────────────────────────────────────────────
    ItemEquipped { id: String },

    ItemUnequipped { id: String },

    ItemUpgraded { id: String, level: u32 },

    ItemSold { id: String, coins: u64, gems: u64 },

    ItemDiscarded { id: String, kind: GearKind },

    ChestOpened { reward: ChestReward },

    MythicalPurchased { id: String, kind: GearKind },

    RelicPurchased { id: String },

    // ── Mining ──────────────────────────────────────────────────
    GemMined { shiny: bool },

    ShinyGemsExchanged { shiny_gems: u64, gems: u64 },

    // ── Timed subsystems ────────────────────────────────────────
    MarketRefreshed { items: usize },

    MenuSkillRolled { skill: MenuSkillType, expires_at: i64 },

    MenuSkillExpired { skill: MenuSkillType },

    GardenGrew { growth_cm: f64 },

    SeedPlanted,

    WaterPurchased { hours: u32 },

    OfflineProgressAccrued { coins: u64, gems: u64 },

    OfflineRewardsClaimed { coins: u64, gems: u64 },

    DailyRewardAvailable { day: u32 },

    DailyRewardClaimed { day: u32, coins: u64, gems: u64 },

    // ── Meta progression ────────────────────────────────────────
    SkillUnlocked { skill_id: String },

    Prestiged { prestige_level: u32, points: u32 },

    MerchantOffersReady { count: usize },

    MerchantRewardClaimed { reward_id: String },

    // ── Preferences and debug ───────────────────────────────────
    SettingsUpdated,

    GameModeChanged { mode: GameModeKind },

    CheatToggled { cheat: CheatKind },

    CurrencyGranted { coins: u64, gems: u64 },

    Teleported { zone: u32 },

    ExperienceSet { experience: u64 },

    GameReset,
}
