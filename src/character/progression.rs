//! Player level, skill points and prestige.

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub skill_points: u32,
    pub unlocked_skills: Vec<String>,
    pub prestige_level: u32,
    pub prestige_points: u32,
    pub mastery_levels: BTreeMap<String, u32>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: xp_for_level(1),
            skill_points: 0,
            unlocked_skills: Vec::new(),
            prestige_level: 0,
            prestige_points: 0,
            mastery_levels: BTreeMap::new(),
        }
    }
}

/// Experience needed to leave `level`: `floor(100 * level^1.5)`.
pub fn xp_for_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)).floor() as u64
}

impl Progression {
    /// Add experience and level up as many times as it covers. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            self.skill_points += 1;
            self.experience_to_next = xp_for_level(self.level);
            gained += 1;
        }
        gained
    }
}

pub fn upgrade_skill(state: &mut GameState, skill_id: &str) -> Result<Vec<GameEvent>, Rejection> {
    let progression = &mut state.progression;
    if progression.skill_points < 1 {
        return Err(Rejection::NoSkillPoints);
    }
    progression.skill_points -= 1;
    progression.unlocked_skills.push(skill_id.to_string());
    *progression
        .mastery_levels
        .entry(skill_id.to_string())
        .or_insert(0) += 1;

    Ok(vec![GameEvent::SkillUnlocked {
        skill_id: skill_id.to_string(),
    }])
}

/// Trade the current level for prestige points and start over at level 1.
pub fn prestige(state: &mut GameState) -> Result<Vec<GameEvent>, Rejection> {
    let progression = &mut state.progression;
    if progression.level < PRESTIGE_MIN_LEVEL {
        return Err(Rejection::PrestigeLocked {
            level: progression.level,
            required: PRESTIGE_MIN_LEVEL,
        });
    }

    let points = progression.level / PRESTIGE_POINTS_DIVISOR;
    *progression = Progression {
        prestige_level: progression.prestige_level + 1,
        prestige_points: progression.prestige_points + points,
        mastery_levels: std::mem::take(&mut progression.mastery_levels),
        ..Progression::default()
    };

    Ok(vec![GameEvent::Prestiged {
        prestige_level: progression.prestige_level,
        points,
    }])
}

/// Debug: overwrite current experience without triggering level-ups.
pub fn set_experience(state: &mut GameState, experience: u64) -> Vec<GameEvent> {
    state.progression.experience = experience;
    vec![GameEvent::ExperienceSet { experience }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_for_level(1), 100);
        assert_eq!(xp_for_level(2), 282);
        assert_eq!(xp_for_level(4), 800);
    }

    #[test]
    fn test_gain_experience_levels_up_and_grants_point() {
        let mut p = Progression::default();
        assert_eq!(p.gain_experience(99), 0);
        assert_eq!(p.gain_experience(1), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 0);
        assert_eq!(p.skill_points, 1);
        assert_eq!(p.experience_to_next, 282);
    }

    #[test]
    fn test_gain_experience_multiple_levels() {
        let mut p = Progression::default();
        assert_eq!(p.gain_experience(100 + 282 + 5), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.experience, 5);
        assert_eq!(p.skill_points, 2);
    }
}
