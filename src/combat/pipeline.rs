//! Damage pipelines for one answered question.
//!
//! A correct answer runs the offense stages in [`OFFENSE_ORDER`]; a wrong
//! answer runs the avoidance checks in [`AVOIDANCE_ORDER`] (first success
//! short-circuits) and then the mitigation steps in [`MITIGATION_ORDER`].
//! Each adventure skill opts into at most one stage per pipeline.

use crate::core::constants::*;
use crate::skills::AdventureSkillType;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffenseStage {
    Berserker,
    CriticalStrike,
    DoubleStrike,
    Ramp,
    BerserkRage,
    BloodPact,
    ElementalMastery,
}

pub const OFFENSE_ORDER: [OffenseStage; 7] = [
    OffenseStage::Berserker,
    OffenseStage::CriticalStrike,
    OffenseStage::DoubleStrike,
    OffenseStage::Ramp,
    OffenseStage::BerserkRage,
    OffenseStage::BloodPact,
    OffenseStage::ElementalMastery,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvoidanceCheck {
    ShadowStep,
    Dodge,
    MetalShield,
    ArcaneShield,
    DivineProtection,
}

pub const AVOIDANCE_ORDER: [AvoidanceCheck; 5] = [
    AvoidanceCheck::ShadowStep,
    AvoidanceCheck::Dodge,
    AvoidanceCheck::MetalShield,
    AvoidanceCheck::ArcaneShield,
    AvoidanceCheck::DivineProtection,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mitigation {
    ShieldWall,
    BerserkerExposure,
    RiskerExposure,
}

pub const MITIGATION_ORDER: [Mitigation; 3] = [
    Mitigation::ShieldWall,
    Mitigation::BerserkerExposure,
    Mitigation::RiskerExposure,
];

/// Player-side inputs to the offense pipeline, read before the turn mutates anything.
#[derive(Debug, Clone, Copy)]
pub struct StrikeContext<'a> {
    pub streak: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub category: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrikeResult {
    pub damage: u32,
    /// Player HP after any self-sacrifice (equal to the input HP otherwise).
    pub hp_after: u32,
    pub critical: bool,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardResult {
    pub avoided_by: Option<AvoidanceCheck>,
    pub damage: u32,
    pub log: Vec<String>,
}

fn scale(damage: u32, factor: f64) -> u32 {
    (damage as f64 * factor).floor() as u32
}

/// Base damage of a correct answer: `max(1, atk - enemy.def)`.
pub fn base_player_damage(atk: u32, enemy_def: u32) -> u32 {
    atk.saturating_sub(enemy_def).max(1)
}

/// Base damage of a wrong answer: `max(1, enemy.atk - def)`.
pub fn base_enemy_damage(enemy_atk: u32, def: u32) -> u32 {
    enemy_atk.saturating_sub(def).max(1)
}

/// Run the offense stages selected by `modifiers` in their fixed order.
pub fn resolve_strike(
    base: u32,
    modifiers: &[AdventureSkillType],
    ctx: &StrikeContext<'_>,
    rng: &mut impl Rng,
) -> StrikeResult {
    let mut damage = base;
    let mut hp_after = ctx.hp;
    let mut critical = false;
    let mut log = Vec::new();

    for stage in OFFENSE_ORDER {
        if !modifiers.iter().any(|m| m.offense_stage() == Some(stage)) {
            continue;
        }
        match stage {
            OffenseStage::Berserker => damage = damage.saturating_mul(2),
            OffenseStage::CriticalStrike => {
                if rng.gen::<f64>() < CRITICAL_STRIKE_CHANCE {
                    damage = damage.saturating_mul(2);
                    critical = true;
                    log.push("Critical Strike! Double damage!".to_string());
                }
            }
            OffenseStage::DoubleStrike => {
                damage = damage.saturating_mul(2);
                log.push("Double Strike activated!".to_string());
            }
            OffenseStage::Ramp => {
                damage = scale(damage, 1.0 + ctx.streak as f64 * STREAK_STEP);
            }
            OffenseStage::BerserkRage => {
                let hp_fraction = if ctx.max_hp == 0 {
                    1.0
                } else {
                    ctx.hp as f64 / ctx.max_hp as f64
                };
                damage = scale(damage, 1.0 + (1.0 - hp_fraction));
            }
            OffenseStage::BloodPact => {
                let sacrifice = (hp_after as f64 * BLOOD_PACT_SACRIFICE).floor() as u32;
                hp_after = hp_after.saturating_sub(sacrifice).max(1);
                damage = damage.saturating_mul(BLOOD_PACT_MULTIPLIER);
                log.push(format!(
                    "Blood Pact: Sacrificed {sacrifice} HP for massive damage!"
                ));
            }
            OffenseStage::ElementalMastery => {
                if let Some(category) = ctx.category {
                    damage = scale(damage, ELEMENTAL_MASTERY_FACTOR);
                    log.push(format!("Elemental Mastery: +50% damage from {category}!"));
                }
            }
        }
    }

    StrikeResult {
        damage,
        hp_after,
        critical,
        log,
    }
}

/// Run avoidance then mitigation for an incoming hit.
///
/// `modifiers` must only contain skills that are still able to fire; the
/// caller marks a one-shot skill spent when `avoided_by` names it.
pub fn resolve_guard(
    base: u32,
    modifiers: &[AdventureSkillType],
    hp: u32,
    rng: &mut impl Rng,
) -> GuardResult {
    let mut log = Vec::new();

    for check in AVOIDANCE_ORDER {
        if !modifiers.iter().any(|m| m.avoidance() == Some(check)) {
            continue;
        }
        let avoided = match check {
            AvoidanceCheck::ShadowStep => {
                log.push("Shadow Step: First wrong answer ignored!".to_string());
                true
            }
            AvoidanceCheck::Dodge => {
                let dodged = rng.gen::<f64>() < DODGE_CHANCE;
                if dodged {
                    log.push("Dodged the attack!".to_string());
                }
                dodged
            }
            AvoidanceCheck::MetalShield => {
                log.push("Metal Shield: Attack blocked!".to_string());
                true
            }
            AvoidanceCheck::ArcaneShield => {
                log.push("Arcane Shield: Immune to damage!".to_string());
                true
            }
            AvoidanceCheck::DivineProtection => {
                let fatal = base >= hp;
                if fatal {
                    log.push("Divine Protection: Cannot die!".to_string());
                }
                fatal
            }
        };
        if avoided {
            return GuardResult {
                avoided_by: Some(check),
                damage: 0,
                log,
            };
        }
    }

    let mut damage = base;
    for step in MITIGATION_ORDER {
        if !modifiers.iter().any(|m| m.mitigation() == Some(step)) {
            continue;
        }
        match step {
            Mitigation::ShieldWall => {
                damage = scale(damage, 0.5);
                log.push("Shield Wall: Damage reduced by 50%!".to_string());
            }
            Mitigation::BerserkerExposure => {
                damage = scale(damage, BERSERKER_DAMAGE_TAKEN_FACTOR);
            }
            Mitigation::RiskerExposure => {
                damage = scale(damage, RISKER_DAMAGE_FACTOR);
            }
        }
    }

    GuardResult {
        avoided_by: None,
        damage,
        log,
    }
}
