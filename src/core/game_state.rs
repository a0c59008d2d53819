use crate::combat::types::{CombatPhase, Enemy};
use crate::core::constants::*;
use crate::economy::merchant::Merchant;
use crate::items::generation::ContentGenerator;
use crate::items::types::{Inventory, Rarity};
use crate::scheduler::daily::DailyRewards;
use crate::scheduler::garden::GardenOfGrowth;
use crate::scheduler::market::{generate_market_items, YojefMarket};
use crate::scheduler::offline::OfflineProgress;
use crate::skills::{AdventureSkills, MenuSkillState};
use crate::character::progression::Progression;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub base_atk: u32,
    pub base_def: u32,
    pub base_hp: u32,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            atk: STARTING_ATK,
            def: STARTING_DEF,
            base_atk: STARTING_ATK,
            base_def: STARTING_DEF,
            base_hp: STARTING_HP,
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn full_heal(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive correct answers and the reward multiplier they drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStreak {
    pub current: u32,
    pub best: u32,
    pub multiplier: f64,
}

impl KnowledgeStreak {
    pub fn multiplier_for(current: u32) -> f64 {
        1.0 + current as f64 * STREAK_STEP
    }

    pub fn record_correct(&mut self) {
        self.current += 1;
        self.best = self.best.max(self.current);
        self.multiplier = Self::multiplier_for(self.current);
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.multiplier = Self::multiplier_for(0);
    }
}

impl Default for KnowledgeStreak {
    fn default() -> Self {
        Self {
            current: 0,
            best: 0,
            multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAccuracy {
    pub correct: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_questions_answered: u64,
    pub correct_answers: u64,
    pub total_play_time: u64,
    pub zones_reached: u32,
    pub items_collected: u64,
    pub coins_earned: u64,
    pub gems_earned: u64,
    pub shiny_gems_earned: u64,
    pub chests_opened: u64,
    pub accuracy_by_category: BTreeMap<String, CategoryAccuracy>,
    pub session_start_time: i64,
    pub total_deaths: u64,
    pub total_victories: u64,
    pub longest_streak: u32,
    pub fastest_victory: u64,
    pub total_damage_dealt: u64,
    pub total_damage_taken: u64,
    pub items_upgraded: u64,
    pub items_sold: u64,
    pub total_research_spent: u64,
    pub average_accuracy: f64,
    pub revivals: u64,
}

impl Statistics {
    pub fn new(now: i64) -> Self {
        Self {
            total_questions_answered: 0,
            correct_answers: 0,
            total_play_time: 0,
            zones_reached: 1,
            items_collected: 0,
            coins_earned: 0,
            gems_earned: 0,
            shiny_gems_earned: 0,
            chests_opened: 0,
            accuracy_by_category: BTreeMap::new(),
            session_start_time: now,
            total_deaths: 0,
            total_victories: 0,
            longest_streak: 0,
            fastest_victory: 0,
            total_damage_dealt: 0,
            total_damage_taken: 0,
            items_upgraded: 0,
            items_sold: 0,
            total_research_spent: 0,
            average_accuracy: 0.0,
            revivals: 0,
        }
    }

    pub fn record_question(&mut self, category: Option<&str>) {
        self.total_questions_answered += 1;
        if let Some(category) = category {
            self.accuracy_by_category
                .entry(category.to_string())
                .or_default()
                .total += 1;
        }
        self.refresh_accuracy();
    }

    pub fn record_correct(&mut self, category: Option<&str>) {
        self.correct_answers += 1;
        if let Some(category) = category {
            self.accuracy_by_category
                .entry(category.to_string())
                .or_default()
                .correct += 1;
        }
        self.refresh_accuracy();
    }

    fn refresh_accuracy(&mut self) {
        self.average_accuracy = if self.total_questions_answered == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions_answered as f64 * 100.0
        };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityStats {
    pub common: u64,
    pub rare: u64,
    pub epic: u64,
    pub legendary: u64,
    pub mythical: u64,
}

impl RarityStats {
    pub fn record(&mut self, rarity: Rarity) {
        match rarity {
            Rarity::Common => self.common += 1,
            Rarity::Rare => self.rare += 1,
            Rarity::Epic => self.epic += 1,
            Rarity::Legendary => self.legendary += 1,
            Rarity::Mythical => self.mythical += 1,
        }
    }
}

/// Which item names the player has ever found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionBook {
    pub weapons: BTreeMap<String, bool>,
    pub armor: BTreeMap<String, bool>,
    pub total_weapons_found: u64,
    pub total_armor_found: u64,
    pub rarity_stats: RarityStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameModeKind {
    #[default]
    Normal,
    Blitz,
    Bloodlust,
    Survival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMode {
    pub current: GameModeKind,
    pub speed_mode_active: bool,
    pub survival_lives: u32,
    pub max_survival_lives: u32,
}

impl Default for GameMode {
    fn default() -> Self {
        Self {
            current: GameModeKind::Normal,
            speed_mode_active: false,
            survival_lives: SURVIVAL_LIVES,
            max_survival_lives: SURVIVAL_LIVES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheatKind {
    InfiniteCoins,
    InfiniteGems,
    ObtainAnyItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cheats {
    pub infinite_coins: bool,
    pub infinite_gems: bool,
    pub obtain_any_item: bool,
}

impl Cheats {
    pub fn toggle(&mut self, kind: CheatKind) {
        let flag = match kind {
            CheatKind::InfiniteCoins => &mut self.infinite_coins,
            CheatKind::InfiniteGems => &mut self.infinite_gems,
            CheatKind::ObtainAnyItem => &mut self.obtain_any_item,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mining {
    pub total_gems_mined: u64,
    pub total_shiny_gems_mined: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub colorblind_mode: bool,
    pub dark_mode: bool,
    pub language: String,
    pub notifications: bool,
    pub snap_to_grid: bool,
    pub beauty_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colorblind_mode: false,
            dark_mode: true,
            language: "en".to_string(),
            notifications: true,
            snap_to_grid: false,
            beauty_mode: false,
        }
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub colorblind_mode: Option<bool>,
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
    pub notifications: Option<bool>,
    pub snap_to_grid: Option<bool>,
    pub beauty_mode: Option<bool>,
}

impl Settings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.colorblind_mode {
            self.colorblind_mode = v;
        }
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.language {
            self.language = v;
        }
        if let Some(v) = patch.notifications {
            self.notifications = v;
        }
        if let Some(v) = patch.snap_to_grid {
            self.snap_to_grid = v;
        }
        if let Some(v) = patch.beauty_mode {
            self.beauty_mode = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchBonuses {
    pub atk: u32,
    pub def: u32,
    pub hp: u32,
    pub coin_multiplier: f64,
    pub gem_multiplier: f64,
    pub xp_multiplier: f64,
}

impl Default for ResearchBonuses {
    fn default() -> Self {
        Self {
            atk: 0,
            def: 0,
            hp: 0,
            coin_multiplier: 1.0,
            gem_multiplier: 1.0,
            xp_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Research {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub total_spent: u64,
    pub bonuses: ResearchBonuses,
}

impl Default for Research {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: 100,
            total_spent: 0,
            bonuses: ResearchBonuses::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub coins: f64,
    pub gems: f64,
    pub atk: f64,
    pub def: f64,
    pub hp: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            coins: 1.0,
            gems: 1.0,
            atk: 1.0,
            def: 1.0,
            hp: 1.0,
        }
    }
}

/// An achievement or player tag as produced by the external evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlockable {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<i64>,
}

/// Root aggregate holding all persisted player progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub coins: u64,
    pub gems: u64,
    pub shiny_gems: u64,
    pub zone: u32,
    pub player_stats: PlayerStats,
    pub inventory: Inventory,
    pub current_enemy: Option<Enemy>,
    pub in_combat: bool,
    pub combat_log: Vec<String>,
    pub is_premium: bool,
    pub achievements: Vec<Unlockable>,
    pub player_tags: Vec<Unlockable>,
    pub collection_book: CollectionBook,
    pub knowledge_streak: KnowledgeStreak,
    pub game_mode: GameMode,
    pub statistics: Statistics,
    pub cheats: Cheats,
    pub mining: Mining,
    pub yojef_market: YojefMarket,
    pub daily_rewards: DailyRewards,
    pub progression: Progression,
    pub offline_progress: OfflineProgress,
    pub garden_of_growth: GardenOfGrowth,
    pub settings: Settings,
    pub has_used_revival: bool,
    pub skills: MenuSkillState,
    pub adventure_skills: AdventureSkills,
    pub research: Research,
    pub multipliers: Multipliers,
    pub merchant: Merchant,
}

impl GameState {
    /// Fresh defaults, with a stocked relic market.
    pub fn new<C: ContentGenerator, R: Rng>(now: i64, content: &C, rng: &mut R) -> Self {
        Self {
            coins: STARTING_COINS,
            gems: STARTING_GEMS,
            shiny_gems: 0,
            zone: 1,
            player_stats: PlayerStats::new(),
            inventory: Inventory::default(),
            current_enemy: None,
            in_combat: false,
            combat_log: Vec::new(),
            is_premium: false,
            achievements: Vec::new(),
            player_tags: Vec::new(),
            collection_book: CollectionBook::default(),
            knowledge_streak: KnowledgeStreak::default(),
            game_mode: GameMode::default(),
            statistics: Statistics::new(now),
            cheats: Cheats::default(),
            mining: Mining::default(),
            yojef_market: YojefMarket::stocked(generate_market_items(content, rng), now),
            daily_rewards: DailyRewards::default(),
            progression: Progression::default(),
            offline_progress: OfflineProgress::new(now),
            garden_of_growth: GardenOfGrowth::default(),
            settings: Settings::default(),
            has_used_revival: false,
            skills: MenuSkillState::new(now),
            adventure_skills: AdventureSkills::default(),
            research: Research::default(),
            multipliers: Multipliers::default(),
            merchant: Merchant::default(),
        }
    }

    pub fn combat_phase(&self) -> CombatPhase {
        if self.in_combat {
            CombatPhase::InCombat
        } else if self.adventure_skills.show_selection_modal {
            CombatPhase::SelectingSkill
        } else {
            CombatPhase::NotInCombat
        }
    }

    /// Leave combat and drop the enemy; the log stays for display.
    pub fn clear_combat(&mut self) {
        self.in_combat = false;
        self.current_enemy = None;
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.combat_log.push(line.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::StandardContent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        GameState::new(1_700_000_000, &StandardContent, &mut rng)
    }

    #[test]
    fn test_new_game_state_defaults() {
        let state = fresh();
        assert_eq!(state.coins, 500);
        assert_eq!(state.gems, 50);
        assert_eq!(state.shiny_gems, 0);
        assert_eq!(state.zone, 1);
        assert_eq!(state.player_stats.hp, 100);
        assert_eq!(state.player_stats.atk, 20);
        assert_eq!(state.player_stats.def, 10);
        assert!(!state.in_combat);
        assert!(state.current_enemy.is_none());
        assert_eq!(state.combat_phase(), CombatPhase::NotInCombat);
    }

    #[test]
    fn test_new_game_state_stocks_market() {
        let state = fresh();
        let count = state.yojef_market.items.len();
        assert!((3..=5).contains(&count));
        assert_eq!(
            state.yojef_market.next_refresh,
            state.yojef_market.last_refresh + 300
        );
    }

    #[test]
    fn test_streak_multiplier_tracks_current() {
        let mut streak = KnowledgeStreak::default();
        for _ in 0..4 {
            streak.record_correct();
        }
        assert_eq!(streak.current, 4);
        assert_eq!(streak.best, 4);
        assert_eq!(streak.multiplier, 1.0 + 4.0 * 0.1);

        streak.reset();
        assert_eq!(streak.current, 0);
        assert_eq!(streak.best, 4);
        assert_eq!(streak.multiplier, 1.0);
    }

    #[test]
    fn test_category_accuracy_recorded() {
        let mut stats = Statistics::new(0);
        stats.record_question(Some("history"));
        stats.record_correct(Some("history"));
        stats.record_question(Some("history"));
        stats.record_question(None);

        let history = stats.accuracy_by_category["history"];
        assert_eq!(history.total, 2);
        assert_eq!(history.correct, 1);
        assert_eq!(stats.total_questions_answered, 3);
    }

    #[test]
    fn test_settings_patch_leaves_unset_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            language: Some("nl".to_string()),
            dark_mode: Some(false),
            ..Default::default()
        });
        assert_eq!(settings.language, "nl");
        assert!(!settings.dark_mode);
        assert!(settings.notifications);
    }

    #[test]
    fn test_cheat_toggle_flips() {
        let mut cheats = Cheats::default();
        cheats.toggle(CheatKind::InfiniteGems);
        assert!(cheats.infinite_gems);
        cheats.toggle(CheatKind::InfiniteGems);
        assert!(!cheats.infinite_gems);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = PlayerStats::new();
        stats.take_damage(30);
        stats.heal(500);
        assert_eq!(stats.hp, stats.max_hp);
    }
}
