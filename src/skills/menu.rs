//! Menu skills: time-boxed meta buffs rolled for coins outside combat.

use crate::core::constants::{
    MENU_SKILL_MAX_HOURS, MENU_SKILL_MIN_HOURS, MENU_SKILL_ROLL_COST, SECONDS_PER_HOUR,
};
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::economy::wallet::spend_coins;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSkillType {
    CoinVacuum,
    Treasurer,
    XpSurge,
    LuckGem,
    Enchanter,
    TimeWarp,
    GoldenTouch,
    KnowledgeBoost,
    DurabilityMaster,
    RelicFinder,
    StatAmplifier,
    QuestionMaster,
    GemMagnet,
    StreakGuardian,
    RevivalBlessing,
    ZoneSkipper,
    ItemDuplicator,
    ResearchAccelerator,
    GardenBooster,
    MarketRefresh,
}

impl MenuSkillType {
    pub const ALL: [MenuSkillType; 20] = [
        MenuSkillType::CoinVacuum,
        MenuSkillType::Treasurer,
        MenuSkillType::XpSurge,
        MenuSkillType::LuckGem,
        MenuSkillType::Enchanter,
        MenuSkillType::TimeWarp,
        MenuSkillType::GoldenTouch,
        MenuSkillType::KnowledgeBoost,
        MenuSkillType::DurabilityMaster,
        MenuSkillType::RelicFinder,
        MenuSkillType::StatAmplifier,
        MenuSkillType::QuestionMaster,
        MenuSkillType::GemMagnet,
        MenuSkillType::StreakGuardian,
        MenuSkillType::RevivalBlessing,
        MenuSkillType::ZoneSkipper,
        MenuSkillType::ItemDuplicator,
        MenuSkillType::ResearchAccelerator,
        MenuSkillType::GardenBooster,
        MenuSkillType::MarketRefresh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MenuSkillType::CoinVacuum => "Coin Vacuum",
            MenuSkillType::Treasurer => "Treasurer",
            MenuSkillType::XpSurge => "XP Surge",
            MenuSkillType::LuckGem => "Lucky Gem",
            MenuSkillType::Enchanter => "Enchanter",
            MenuSkillType::TimeWarp => "Time Warp",
            MenuSkillType::GoldenTouch => "Golden Touch",
            MenuSkillType::KnowledgeBoost => "Knowledge Boost",
            MenuSkillType::DurabilityMaster => "Durability Master",
            MenuSkillType::RelicFinder => "Relic Finder",
            MenuSkillType::StatAmplifier => "Stat Amplifier",
            MenuSkillType::QuestionMaster => "Question Master",
            MenuSkillType::GemMagnet => "Gem Magnet",
            MenuSkillType::StreakGuardian => "Streak Guardian",
            MenuSkillType::RevivalBlessing => "Revival Blessing",
            MenuSkillType::ZoneSkipper => "Zone Skipper",
            MenuSkillType::ItemDuplicator => "Item Duplicator",
            MenuSkillType::ResearchAccelerator => "Research Accelerator",
            MenuSkillType::GardenBooster => "Garden Booster",
            MenuSkillType::MarketRefresh => "Market Refresh",
        }
    }

    pub fn coin_multiplier(&self) -> f64 {
        match self {
            MenuSkillType::CoinVacuum => 2.0,
            MenuSkillType::Treasurer | MenuSkillType::GoldenTouch => 1.5,
            _ => 1.0,
        }
    }

    pub fn gem_multiplier(&self) -> f64 {
        match self {
            MenuSkillType::GemMagnet => 2.0,
            MenuSkillType::LuckGem => 1.5,
            _ => 1.0,
        }
    }

    pub fn xp_multiplier(&self) -> f64 {
        match self {
            MenuSkillType::XpSurge => 2.0,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skill_type: MenuSkillType,
    pub duration_hours: i64,
    pub activated_at: i64,
    pub expires_at: i64,
}

impl MenuSkill {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSkillState {
    pub active_menu_skill: Option<MenuSkill>,
    pub last_roll_time: Option<i64>,
    pub play_time_this_session: u64,
    pub session_start_time: i64,
}

impl MenuSkillState {
    pub fn new(now: i64) -> Self {
        Self {
            active_menu_skill: None,
            last_roll_time: None,
            play_time_this_session: 0,
            session_start_time: now,
        }
    }

    /// The active skill, ignoring one whose deadline has passed but which the
    /// scheduler has not swept yet.
    pub fn live_skill(&self, now: i64) -> Option<&MenuSkill> {
        self.active_menu_skill
            .as_ref()
            .filter(|skill| !skill.is_expired(now))
    }
}

/// Roll one menu skill uniformly from the catalog.
pub fn roll_menu_skill(now: i64, rng: &mut impl Rng) -> MenuSkill {
    let skill_type = MenuSkillType::ALL[rng.gen_range(0..MenuSkillType::ALL.len())];
    let duration_hours = rng.gen_range(MENU_SKILL_MIN_HOURS..=MENU_SKILL_MAX_HOURS);
    let id: u64 = rng.gen();

    MenuSkill {
        id: format!("{id:016x}"),
        name: skill_type.name().to_string(),
        description: "A powerful temporary skill effect".to_string(),
        skill_type,
        duration_hours,
        activated_at: now,
        expires_at: now + duration_hours * SECONDS_PER_HOUR,
    }
}

/// Pay the roll cost and replace any active menu skill with a fresh roll.
pub fn purchase_menu_skill(
    state: &mut GameState,
    now: i64,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, Rejection> {
    spend_coins(state, MENU_SKILL_ROLL_COST)?;
    let skill = roll_menu_skill(now, rng);
    let event = GameEvent::MenuSkillRolled {
        skill: skill.skill_type,
        expires_at: skill.expires_at,
    };
    state.skills.active_menu_skill = Some(skill);
    state.skills.last_roll_time = Some(now);
    Ok(vec![event])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rolled_duration_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let skill = roll_menu_skill(0, &mut rng);
            assert!((2..=8).contains(&skill.duration_hours));
            assert_eq!(skill.expires_at, skill.duration_hours * 3600);
        }
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let skill = roll_menu_skill(100, &mut rng);
        assert!(!skill.is_expired(skill.expires_at - 1));
        assert!(skill.is_expired(skill.expires_at));
    }

    #[test]
    fn test_live_skill_hides_expired() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = MenuSkillState::new(0);
        let skill = roll_menu_skill(0, &mut rng);
        let expires = skill.expires_at;
        state.active_menu_skill = Some(skill);
        assert!(state.live_skill(expires - 1).is_some());
        assert!(state.live_skill(expires).is_none());
    }

    #[test]
    fn test_purchase_overwrites_previous_skill() {
        use crate::items::generation::StandardContent;

        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        purchase_menu_skill(&mut state, 10, &mut rng).unwrap();
        let first = state.skills.active_menu_skill.clone().unwrap();
        purchase_menu_skill(&mut state, 20, &mut rng).unwrap();
        let second = state.skills.active_menu_skill.clone().unwrap();

        assert_eq!(state.coins, 300);
        assert_ne!(first.id, second.id);
        assert_eq!(second.activated_at, 20);
        assert_eq!(state.skills.last_roll_time, Some(20));
    }

    #[test]
    fn test_purchase_requires_coins() {
        use crate::items::generation::StandardContent;

        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.coins = 99;
        assert!(purchase_menu_skill(&mut state, 0, &mut rng).is_err());
        assert!(state.skills.active_menu_skill.is_none());
    }

    #[test]
    fn test_reward_multipliers() {
        assert_eq!(MenuSkillType::CoinVacuum.coin_multiplier(), 2.0);
        assert_eq!(MenuSkillType::GemMagnet.gem_multiplier(), 2.0);
        assert_eq!(MenuSkillType::MarketRefresh.coin_multiplier(), 1.0);
    }
}
