//! Adventure skills: per-run combat modifiers drawn three at a time.
//!
//! Each variant opts into at most one stage of each damage pipeline (see
//! [`crate::combat::pipeline`]). Only one skill is active per run, and the
//! one-shot variants share a single `spent` bit.

use crate::combat::pipeline::{AvoidanceCheck, Mitigation, OffenseStage};
use crate::core::constants::ADVENTURE_SKILL_CHOICES;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdventureSkillType {
    Risker,
    LightningChain,
    SkipCard,
    MetalShield,
    TruthLies,
    Ramp,
    Dodge,
    Berserker,
    Vampiric,
    Phoenix,
    TimeSlow,
    CriticalStrike,
    ShieldWall,
    PoisonBlade,
    ArcaneShield,
    BattleFrenzy,
    ElementalMastery,
    ShadowStep,
    HealingAura,
    DoubleStrike,
    ManaShield,
    BerserkRage,
    DivineProtection,
    StormCall,
    BloodPact,
}

impl AdventureSkillType {
    pub const ALL: [AdventureSkillType; 25] = [
        AdventureSkillType::Risker,
        AdventureSkillType::LightningChain,
        AdventureSkillType::SkipCard,
        AdventureSkillType::MetalShield,
        AdventureSkillType::TruthLies,
        AdventureSkillType::Ramp,
        AdventureSkillType::Dodge,
        AdventureSkillType::Berserker,
        AdventureSkillType::Vampiric,
        AdventureSkillType::Phoenix,
        AdventureSkillType::TimeSlow,
        AdventureSkillType::CriticalStrike,
        AdventureSkillType::ShieldWall,
        AdventureSkillType::PoisonBlade,
        AdventureSkillType::ArcaneShield,
        AdventureSkillType::BattleFrenzy,
        AdventureSkillType::ElementalMastery,
        AdventureSkillType::ShadowStep,
        AdventureSkillType::HealingAura,
        AdventureSkillType::DoubleStrike,
        AdventureSkillType::ManaShield,
        AdventureSkillType::BerserkRage,
        AdventureSkillType::DivineProtection,
        AdventureSkillType::StormCall,
        AdventureSkillType::BloodPact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AdventureSkillType::Risker => "Risker",
            AdventureSkillType::LightningChain => "Lightning Chain",
            AdventureSkillType::SkipCard => "Skip Card",
            AdventureSkillType::MetalShield => "Metal Shield",
            AdventureSkillType::TruthLies => "Truth & Lies",
            AdventureSkillType::Ramp => "Ramp",
            AdventureSkillType::Dodge => "Dodge",
            AdventureSkillType::Berserker => "Berserker",
            AdventureSkillType::Vampiric => "Vampiric",
            AdventureSkillType::Phoenix => "Phoenix",
            AdventureSkillType::TimeSlow => "Time Slow",
            AdventureSkillType::CriticalStrike => "Critical Strike",
            AdventureSkillType::ShieldWall => "Shield Wall",
            AdventureSkillType::PoisonBlade => "Poison Blade",
            AdventureSkillType::ArcaneShield => "Arcane Shield",
            AdventureSkillType::BattleFrenzy => "Battle Frenzy",
            AdventureSkillType::ElementalMastery => "Elemental Mastery",
            AdventureSkillType::ShadowStep => "Shadow Step",
            AdventureSkillType::HealingAura => "Healing Aura",
            AdventureSkillType::DoubleStrike => "Double Strike",
            AdventureSkillType::ManaShield => "Mana Shield",
            AdventureSkillType::BerserkRage => "Berserk Rage",
            AdventureSkillType::DivineProtection => "Divine Protection",
            AdventureSkillType::StormCall => "Storm Call",
            AdventureSkillType::BloodPact => "Blood Pact",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AdventureSkillType::Risker => "Gain +50% HP but take +25% damage",
            AdventureSkillType::LightningChain => "Correct answers deal damage to next enemy too",
            AdventureSkillType::SkipCard => "Skip one question and automatically get it right",
            AdventureSkillType::MetalShield => "Block the first enemy attack completely",
            AdventureSkillType::TruthLies => "Remove one wrong answer from multiple choice questions",
            AdventureSkillType::Ramp => "Each correct answer increases damage by 10%",
            AdventureSkillType::Dodge => "50% chance to avoid enemy attacks",
            AdventureSkillType::Berserker => "+100% damage but -50% defense",
            AdventureSkillType::Vampiric => "Heal 25% of damage dealt",
            AdventureSkillType::Phoenix => "Revive once with 50% HP when defeated",
            AdventureSkillType::TimeSlow => "+50% time to answer questions",
            AdventureSkillType::CriticalStrike => "25% chance to deal double damage",
            AdventureSkillType::ShieldWall => "Reduce all damage taken by 50%",
            AdventureSkillType::PoisonBlade => "Attacks poison enemies for 3 turns",
            AdventureSkillType::ArcaneShield => "Immune to enemy damage while active",
            AdventureSkillType::BattleFrenzy => "Attack speed increases with each correct answer",
            AdventureSkillType::ElementalMastery => "Deal bonus damage based on question category",
            AdventureSkillType::ShadowStep => "First wrong answer doesn't count",
            AdventureSkillType::HealingAura => "Regenerate 10% HP each turn",
            AdventureSkillType::DoubleStrike => "Each attack hits twice",
            AdventureSkillType::ManaShield => "Convert 50% damage to mana cost",
            AdventureSkillType::BerserkRage => "Damage increases as HP decreases",
            AdventureSkillType::DivineProtection => "Survive one otherwise fatal hit",
            AdventureSkillType::StormCall => "Lightning strikes random enemies",
            AdventureSkillType::BloodPact => "Sacrifice HP for massive damage",
        }
    }

    /// Skills that fire once per run and are then spent.
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            AdventureSkillType::SkipCard
                | AdventureSkillType::MetalShield
                | AdventureSkillType::Phoenix
                | AdventureSkillType::ShadowStep
                | AdventureSkillType::DivineProtection
        )
    }

    pub fn offense_stage(&self) -> Option<OffenseStage> {
        match self {
            AdventureSkillType::Berserker => Some(OffenseStage::Berserker),
            AdventureSkillType::CriticalStrike => Some(OffenseStage::CriticalStrike),
            AdventureSkillType::DoubleStrike => Some(OffenseStage::DoubleStrike),
            AdventureSkillType::Ramp => Some(OffenseStage::Ramp),
            AdventureSkillType::BerserkRage => Some(OffenseStage::BerserkRage),
            AdventureSkillType::BloodPact => Some(OffenseStage::BloodPact),
            AdventureSkillType::ElementalMastery => Some(OffenseStage::ElementalMastery),
            _ => None,
        }
    }

    pub fn avoidance(&self) -> Option<AvoidanceCheck> {
        match self {
            AdventureSkillType::ShadowStep => Some(AvoidanceCheck::ShadowStep),
            AdventureSkillType::Dodge => Some(AvoidanceCheck::Dodge),
            AdventureSkillType::MetalShield => Some(AvoidanceCheck::MetalShield),
            AdventureSkillType::ArcaneShield => Some(AvoidanceCheck::ArcaneShield),
            AdventureSkillType::DivineProtection => Some(AvoidanceCheck::DivineProtection),
            _ => None,
        }
    }

    pub fn mitigation(&self) -> Option<Mitigation> {
        match self {
            AdventureSkillType::ShieldWall => Some(Mitigation::ShieldWall),
            AdventureSkillType::Berserker => Some(Mitigation::BerserkerExposure),
            AdventureSkillType::Risker => Some(Mitigation::RiskerExposure),
            _ => None,
        }
    }
}

/// One drawn skill offer, as shown in the selection round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventureSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skill_type: AdventureSkillType,
}

impl AdventureSkill {
    pub fn new(id: String, skill_type: AdventureSkillType) -> Self {
        Self {
            id,
            name: skill_type.name().to_string(),
            description: skill_type.description().to_string(),
            skill_type,
        }
    }
}

/// Modifier bookkeeping for the current run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillEffects {
    /// The skill activated for this run, if any.
    pub active: Option<AdventureSkillType>,
    /// Set once a one-shot skill has fired.
    pub spent: bool,
}

impl SkillEffects {
    pub fn activate(skill_type: AdventureSkillType) -> Self {
        Self {
            active: Some(skill_type),
            spent: false,
        }
    }

    pub fn is_active(&self, skill_type: AdventureSkillType) -> bool {
        self.active == Some(skill_type)
    }

    /// Active and, for one-shot skills, not yet spent.
    pub fn is_ready(&self, skill_type: AdventureSkillType) -> bool {
        self.is_active(skill_type) && !(skill_type.is_one_shot() && self.spent)
    }

    /// Modifiers still able to fire this turn.
    pub fn live_modifiers(&self) -> Vec<AdventureSkillType> {
        self.active
            .filter(|&t| self.is_ready(t))
            .into_iter()
            .collect()
    }

    pub fn spend(&mut self) {
        self.spent = true;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdventureSkills {
    pub selected_skill: Option<AdventureSkill>,
    pub available_skills: Vec<AdventureSkill>,
    pub show_selection_modal: bool,
    pub skill_effects: SkillEffects,
}

/// Draw offers without replacement (shuffle the catalog, take three).
pub fn draw_adventure_skills(now: i64, rng: &mut impl Rng) -> Vec<AdventureSkill> {
    let mut catalog = AdventureSkillType::ALL.to_vec();
    catalog.shuffle(rng);
    catalog
        .into_iter()
        .take(ADVENTURE_SKILL_CHOICES)
        .enumerate()
        .map(|(index, skill_type)| AdventureSkill::new(format!("skill_{now}_{index}"), skill_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_draw_three_distinct_skills() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let drawn = draw_adventure_skills(1000, &mut rng);
            assert_eq!(drawn.len(), 3);
            let types: HashSet<_> = drawn.iter().map(|s| s.skill_type).collect();
            assert_eq!(types.len(), 3, "draw must be without replacement");
        }
    }

    #[test]
    fn test_drawn_ids_are_indexed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drawn = draw_adventure_skills(42, &mut rng);
        assert_eq!(drawn[0].id, "skill_42_0");
        assert_eq!(drawn[2].id, "skill_42_2");
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        let set: HashSet<_> = AdventureSkillType::ALL.iter().collect();
        assert_eq!(set.len(), AdventureSkillType::ALL.len());
    }

    #[test]
    fn test_one_shot_spent_blocks_readiness() {
        let mut effects = SkillEffects::activate(AdventureSkillType::Phoenix);
        assert!(effects.is_ready(AdventureSkillType::Phoenix));
        effects.spend();
        assert!(!effects.is_ready(AdventureSkillType::Phoenix));
        assert!(effects.live_modifiers().is_empty());
    }

    #[test]
    fn test_persistent_skill_ignores_spent_bit() {
        let mut effects = SkillEffects::activate(AdventureSkillType::Dodge);
        effects.spend();
        assert!(effects.is_ready(AdventureSkillType::Dodge));
    }

    #[test]
    fn test_berserker_opts_into_offense_and_mitigation() {
        assert_eq!(
            AdventureSkillType::Berserker.offense_stage(),
            Some(OffenseStage::Berserker)
        );
        assert_eq!(
            AdventureSkillType::Berserker.mitigation(),
            Some(Mitigation::BerserkerExposure)
        );
        assert!(AdventureSkillType::Berserker.avoidance().is_none());
    }
}
