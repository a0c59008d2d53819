// Persistence
pub const STORAGE_KEY: &str = "hugoland_game_state";
pub const SAVE_VERSION_MAGIC: u64 = 0x4855_474F_4C41_4E44; // "HUGOLAND"

// Starting state
pub const STARTING_COINS: u64 = 500;
pub const STARTING_GEMS: u64 = 50;
pub const STARTING_HP: u32 = 100;
pub const STARTING_ATK: u32 = 20;
pub const STARTING_DEF: u32 = 10;

// Currencies
pub const SHINY_GEM_EXCHANGE_RATE: u64 = 10;
pub const SHINY_GEM_MINE_CHANCE: f64 = 0.05;

// Knowledge streak: multiplier = 1 + current * STREAK_STEP
pub const STREAK_STEP: f64 = 0.1;

// Victory rewards
pub const COIN_REWARD_BASE: u64 = 50;
pub const COIN_REWARD_PER_ZONE: u64 = 10;
pub const GEM_REWARD_BASE: u64 = 5;
pub const GEM_REWARD_ZONE_DIVISOR: u32 = 5;
pub const PREMIUM_UNLOCK_ZONE: u32 = 50;

// Anti-inflation rebalance
pub const MAX_HITS_BEFORE_BOOST: u32 = 5;
pub const BOOST_HP_FACTOR: f64 = 1.5;

// Per-turn regeneration (fractions of max HP)
pub const TURN_REGEN_FRACTION: f64 = 0.05;
pub const HEALING_AURA_FRACTION: f64 = 0.10;

// Poison
pub const POISON_TURNS: u32 = 3;
pub const POISON_DAMAGE_FRACTION: f64 = 0.10;

// Checkpoints and revival
pub const CHECKPOINT_SPACING: u32 = 5;
pub const REVIVAL_COST_FRACTION: f64 = 0.5;

// Equipment and relic upgrades
pub const UPGRADE_COST_FACTOR: f64 = 1.5;
pub const WEAPON_ATK_PER_UPGRADE: u32 = 10;
pub const ARMOR_DEF_PER_UPGRADE: u32 = 5;
pub const RELIC_ATK_PER_UPGRADE: u32 = 22;
pub const RELIC_DEF_PER_UPGRADE: u32 = 15;
pub const RELIC_SELL_FRACTION: f64 = 0.5;

// Chests
pub const CHEST_BONUS_GEMS_MIN: u64 = 5;
pub const CHEST_BONUS_GEMS_MAX: u64 = 14;

// Hugoland fragments and merchant
pub const FRAGMENT_ZONE_INTERVAL: u32 = 5;
pub const FRAGMENTS_PER_EXCHANGE: u32 = 5;
pub const MERCHANT_OFFER_COUNT: usize = 3;
pub const MERCHANT_COINS_MIN: u64 = 1000;
pub const MERCHANT_COINS_MAX: u64 = 2999;
pub const MERCHANT_GEMS_MIN: u64 = 50;
pub const MERCHANT_GEMS_MAX: u64 = 150;

// Adventure skills
pub const ADVENTURE_SKILL_CHOICES: usize = 3;
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.25;
pub const DODGE_CHANCE: f64 = 0.5;
pub const RISKER_HP_FACTOR: f64 = 1.5;
pub const RISKER_DAMAGE_FACTOR: f64 = 1.25;
pub const BERSERKER_DEF_FACTOR: f64 = 0.5;
pub const BERSERKER_DAMAGE_TAKEN_FACTOR: f64 = 1.5;
pub const BLOOD_PACT_SACRIFICE: f64 = 0.2;
pub const BLOOD_PACT_MULTIPLIER: u32 = 3;
pub const VAMPIRIC_FRACTION: f64 = 0.25;
pub const ELEMENTAL_MASTERY_FACTOR: f64 = 1.5;
pub const PHOENIX_REVIVE_FRACTION: f64 = 0.5;

// Menu skills
pub const MENU_SKILL_ROLL_COST: u64 = 100;
pub const MENU_SKILL_MIN_HOURS: i64 = 2;
pub const MENU_SKILL_MAX_HOURS: i64 = 8;

// Character progression
pub const XP_PER_VICTORY_BASE: u64 = 10;
pub const XP_PER_VICTORY_PER_ZONE: u64 = 2;
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const PRESTIGE_MIN_LEVEL: u32 = 50;
pub const PRESTIGE_POINTS_DIVISOR: u32 = 10;

// Relic market (Yojef)
pub const MARKET_REFRESH_SECONDS: i64 = 5 * 60;
pub const MARKET_POLL_INTERVAL_SECONDS: u64 = 30;
pub const MARKET_MIN_ITEMS: usize = 3;
pub const MARKET_MAX_ITEMS: usize = 5;

// Offline progress
pub const OFFLINE_MIN_GAP_SECONDS: i64 = 5 * 60;
pub const DEFAULT_MAX_OFFLINE_HOURS: u32 = 24;
pub const OFFLINE_COINS_PER_ZONE_HOUR: f64 = 10.0;

// Garden of Growth
pub const GARDEN_SEED_COST: u64 = 1000;
pub const GARDEN_WATER_COST: u64 = 1000;
pub const GARDEN_STARTING_WATER_HOURS: u32 = 24;
pub const GARDEN_MAX_GROWTH_CM: f64 = 100.0;
pub const GARDEN_GROWTH_CM_PER_HOUR: f64 = 1.0;
pub const GARDEN_BONUS_PER_CM: f64 = 0.5;

// Daily rewards
pub const DAILY_STREAK_CAP: u32 = 7;
pub const DAILY_COINS_PER_DAY: u64 = 100;
pub const DAILY_GEMS_PER_DAY: u64 = 10;

// Game modes
pub const SURVIVAL_LIVES: u32 = 3;

pub const SECONDS_PER_HOUR: i64 = 60 * 60;
