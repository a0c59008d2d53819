use super::pipeline::{
    base_enemy_damage, base_player_damage, resolve_guard, resolve_strike, StrikeContext,
};
use super::types::{Enemy, TurnOutcome};
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::GameEvent;
use crate::core::game_state::{GameModeKind, GameState};
use crate::economy::rewards::{
    checkpoint_zone, coin_reward, gem_reward, rebalance, revival_cost, victory_experience,
    RewardMultipliers,
};
use crate::items::generation::ContentGenerator;
use crate::skills::{draw_adventure_skills, AdventureSkillType, AdventureSkills, SkillEffects};
use rand::Rng;

fn fraction_of(value: u32, fraction: f64) -> u32 {
    (value as f64 * fraction).floor() as u32
}

/// Open a skill selection round. Combat itself starts once the player picks or skips.
pub fn start_combat(
    state: &mut GameState,
    now: i64,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, Rejection> {
    if state.in_combat {
        return Err(Rejection::AlreadyInCombat);
    }

    let offers = draw_adventure_skills(now, rng);
    let skills = offers.iter().map(|s| s.skill_type).collect();
    state.adventure_skills = AdventureSkills {
        selected_skill: None,
        available_skills: offers,
        show_selection_modal: true,
        skill_effects: SkillEffects::default(),
    };

    Ok(vec![GameEvent::SkillsOffered { skills }])
}

/// Spawn the zone's enemy and reset the log to the encounter line plus `extra`.
fn begin_encounter<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    extra: Option<String>,
    content: &C,
    rng: &mut R,
) -> GameEvent {
    let enemy = content.generate_enemy(state.zone, rng);
    state.combat_log = vec![format!(
        "You encounter a {} in Zone {}!",
        enemy.name, enemy.zone
    )];
    state.combat_log.extend(extra);

    let event = GameEvent::EncounterStarted {
        enemy_name: enemy.name.clone(),
        zone: enemy.zone,
    };
    state.current_enemy = Some(enemy);
    state.in_combat = true;
    state.adventure_skills.show_selection_modal = false;
    event
}

pub fn select_adventure_skill<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    skill_id: &str,
    content: &C,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    if !state.adventure_skills.show_selection_modal {
        return Err(Rejection::NoSkillSelection);
    }
    let skill = state
        .adventure_skills
        .available_skills
        .iter()
        .find(|s| s.id == skill_id)
        .cloned()
        .ok_or_else(|| Rejection::UnknownSkill(skill_id.to_string()))?;

    // Run-long stat reshapes; the run ends before they can stack again.
    let stats = &mut state.player_stats;
    match skill.skill_type {
        AdventureSkillType::Risker => {
            stats.max_hp = fraction_of(stats.max_hp, RISKER_HP_FACTOR);
            stats.full_heal();
        }
        AdventureSkillType::Berserker => {
            stats.atk = stats.atk.saturating_mul(2);
            stats.def = fraction_of(stats.def, BERSERKER_DEF_FACTOR);
        }
        _ => {}
    }

    let skill_type = skill.skill_type;
    let active_line = format!("{} is now active!", skill.name);
    state.adventure_skills.skill_effects = SkillEffects::activate(skill_type);
    state.adventure_skills.selected_skill = Some(skill);

    let encounter = begin_encounter(state, Some(active_line), content, rng);
    Ok(vec![GameEvent::SkillSelected { skill: skill_type }, encounter])
}

pub fn skip_adventure_skills<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    content: &C,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    if !state.adventure_skills.show_selection_modal {
        return Err(Rejection::NoSkillSelection);
    }
    state.adventure_skills.selected_skill = None;
    state.adventure_skills.skill_effects = SkillEffects::default();

    let encounter = begin_encounter(state, None, content, rng);
    Ok(vec![GameEvent::SkillsSkipped, encounter])
}

/// Resolve one answered question.
///
/// Turn order: statistics, hit or miss branch, poison tick, then victory if
/// the enemy is at zero HP. Rewards use the streak multiplier the turn
/// started with.
pub fn attack<R: Rng>(
    state: &mut GameState,
    hit: bool,
    category: Option<&str>,
    now: i64,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    if !state.in_combat {
        return Err(Rejection::NotInCombat);
    }
    let Some(mut enemy) = state.current_enemy.take() else {
        return Err(Rejection::NotInCombat);
    };

    let mut events = Vec::new();
    let streak_multiplier = state.knowledge_streak.multiplier;
    state.statistics.record_question(category);

    let mut outcome = if hit {
        resolve_correct(state, &mut enemy, category, rng, &mut events)
    } else {
        resolve_wrong(state, &enemy, rng, &mut events)
    };

    if outcome == TurnOutcome::Continue {
        tick_poison(state, &mut enemy, &mut events);
        if !enemy.is_alive() {
            outcome = TurnOutcome::Victory;
        }
    }

    match outcome {
        TurnOutcome::Continue => state.current_enemy = Some(enemy),
        TurnOutcome::Victory => resolve_victory(state, &enemy, streak_multiplier, now, &mut events),
        TurnOutcome::Defeat => resolve_defeat(state, &mut events),
    }

    Ok(events)
}

fn resolve_correct<R: Rng>(
    state: &mut GameState,
    enemy: &mut Enemy,
    category: Option<&str>,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> TurnOutcome {
    let effects = state.adventure_skills.skill_effects.clone();
    let modifiers = effects.live_modifiers();
    let stats = &state.player_stats;

    let ctx = StrikeContext {
        streak: state.knowledge_streak.current,
        hp: stats.hp,
        max_hp: stats.max_hp,
        category,
    };
    let strike = resolve_strike(base_player_damage(stats.atk, enemy.def), &modifiers, &ctx, rng);

    state.combat_log.extend(strike.log);
    state.player_stats.hp = strike.hp_after;
    enemy.take_damage(strike.damage);
    state
        .combat_log
        .push(format!("You deal {} damage to the {}!", strike.damage, enemy.name));
    state.statistics.total_damage_dealt += strike.damage as u64;
    events.push(GameEvent::PlayerAttack {
        damage: strike.damage,
        was_crit: strike.critical,
    });

    // HP effects stack in order, each capped at max HP.
    if effects.is_ready(AdventureSkillType::Vampiric) {
        let healing = fraction_of(strike.damage, VAMPIRIC_FRACTION);
        state.player_stats.heal(healing);
        state.log(format!("Vampiric: Healed {healing} HP!"));
        events.push(GameEvent::PlayerHealed { amount: healing });
    }

    if effects.is_ready(AdventureSkillType::PoisonBlade) {
        enemy.apply_poison(POISON_TURNS);
        state.log(format!("{} is poisoned!", enemy.name));
        events.push(GameEvent::EnemyPoisoned {
            turns: POISON_TURNS,
        });
    }

    state.knowledge_streak.record_correct();
    state.statistics.record_correct(category);
    state.statistics.longest_streak = state
        .statistics
        .longest_streak
        .max(state.knowledge_streak.current);

    let regen = fraction_of(state.player_stats.max_hp, TURN_REGEN_FRACTION);
    if regen > 0 {
        state.player_stats.heal(regen);
        state.log(format!("Regenerated {regen} HP!"));
        events.push(GameEvent::PlayerHealed { amount: regen });
    }

    if effects.is_ready(AdventureSkillType::HealingAura) {
        let aura = fraction_of(state.player_stats.max_hp, HEALING_AURA_FRACTION);
        state.player_stats.heal(aura);
        state.log(format!("Healing Aura: +{aura} HP!"));
        events.push(GameEvent::PlayerHealed { amount: aura });
    }

    if enemy.is_alive() {
        TurnOutcome::Continue
    } else {
        TurnOutcome::Victory
    }
}

fn resolve_wrong<R: Rng>(
    state: &mut GameState,
    enemy: &Enemy,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> TurnOutcome {
    let modifiers = state.adventure_skills.skill_effects.live_modifiers();
    let base = base_enemy_damage(enemy.atk, state.player_stats.def);
    let guard = resolve_guard(base, &modifiers, state.player_stats.hp, rng);
    state.combat_log.extend(guard.log);

    if guard.avoided_by.is_some() {
        let effects = &mut state.adventure_skills.skill_effects;
        if let Some(skill) = effects.active {
            if skill.is_one_shot() {
                effects.spend();
            }
            events.push(GameEvent::AttackAvoided { by: skill });
        }
    } else {
        state.player_stats.take_damage(guard.damage);
        state.log(format!(
            "The {} deals {} damage to you!",
            enemy.name, guard.damage
        ));
        state.statistics.total_damage_taken += guard.damage as u64;
        events.push(GameEvent::EnemyAttack {
            damage: guard.damage,
            enemy_name: enemy.name.clone(),
        });
    }

    state.knowledge_streak.reset();

    if state.player_stats.hp > 0 {
        return TurnOutcome::Continue;
    }

    let effects = &mut state.adventure_skills.skill_effects;
    if effects.is_ready(AdventureSkillType::Phoenix) {
        effects.spend();
        let hp = fraction_of(state.player_stats.max_hp, PHOENIX_REVIVE_FRACTION);
        state.player_stats.hp = hp;
        state.log("Phoenix: Revived with 50% HP!");
        events.push(GameEvent::PhoenixRevived { hp });
        TurnOutcome::Continue
    } else {
        TurnOutcome::Defeat
    }
}

fn tick_poison(state: &mut GameState, enemy: &mut Enemy, events: &mut Vec<GameEvent>) {
    if !enemy.is_poisoned || enemy.poison_turns == 0 {
        return;
    }
    let damage = fraction_of(enemy.max_hp, POISON_DAMAGE_FRACTION);
    enemy.take_damage(damage);
    enemy.poison_turns -= 1;
    state.log(format!("{} takes {} poison damage!", enemy.name, damage));
    events.push(GameEvent::PoisonTick { damage });

    if enemy.poison_turns == 0 {
        enemy.is_poisoned = false;
        state.log(format!("{} is no longer poisoned.", enemy.name));
    }
}

fn resolve_victory(
    state: &mut GameState,
    enemy: &Enemy,
    streak_multiplier: f64,
    now: i64,
    events: &mut Vec<GameEvent>,
) {
    let extra = RewardMultipliers::for_state(state, now);
    let zone = state.zone;
    let coins = coin_reward(zone, streak_multiplier * extra.coins);
    let gems = gem_reward(zone, streak_multiplier * extra.gems);
    let experience = (victory_experience(zone) as f64 * extra.experience).floor() as u64;

    state.log(format!(
        "{} defeated! You gain {} coins and {} gems!",
        enemy.name, coins, gems
    ));
    state.coins = state.coins.saturating_add(coins);
    state.gems = state.gems.saturating_add(gems);
    state.zone = zone + 1;
    state.clear_combat();

    let stats = &mut state.statistics;
    stats.total_victories += 1;
    stats.coins_earned += coins;
    stats.gems_earned += gems;
    stats.zones_reached = stats.zones_reached.max(state.zone);

    events.push(GameEvent::EnemyDefeated {
        enemy_name: enemy.name.clone(),
        zone,
    });
    events.push(GameEvent::RewardsGranted {
        coins,
        gems,
        experience,
    });
    events.push(GameEvent::ZoneAdvanced { zone: state.zone });

    if state.zone >= PREMIUM_UNLOCK_ZONE && !state.is_premium {
        state.is_premium = true;
        events.push(GameEvent::PremiumUnlocked);
    }

    if state.merchant.award_fragment(state.zone) {
        state.log("You found a Hugoland Fragment!");
        events.push(GameEvent::FragmentFound {
            fragments: state.merchant.hugoland_fragments,
        });
    }

    if rebalance(&mut state.player_stats, enemy.max_hp, enemy.def) {
        state.log("Anti-inflation boost! Your stats have been enhanced!");
        state.log("ATK and DEF doubled, HP increased by 50%!");
        let stats = &state.player_stats;
        events.push(GameEvent::StatsBoosted {
            atk: stats.atk,
            def: stats.def,
            max_hp: stats.max_hp,
        });
    }

    let before = state.progression.level;
    if state.progression.gain_experience(experience) > 0 {
        for level in before + 1..=state.progression.level {
            events.push(GameEvent::LevelUp { level });
        }
    }
}

fn resolve_defeat(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.log("You have been defeated!");
    state.clear_combat();
    state.statistics.total_deaths += 1;
    if state.game_mode.current == GameModeKind::Survival {
        state.game_mode.survival_lives = state.game_mode.survival_lives.saturating_sub(1);
    }
    events.push(GameEvent::PlayerDied);
}

/// Spend the run's skip card: the current question counts as answered correctly.
pub fn use_skip_card<R: Rng>(
    state: &mut GameState,
    now: i64,
    rng: &mut R,
) -> Result<Vec<GameEvent>, Rejection> {
    if !state.in_combat {
        return Err(Rejection::NotInCombat);
    }
    let effects = &mut state.adventure_skills.skill_effects;
    if !effects.is_ready(AdventureSkillType::SkipCard) {
        return Err(Rejection::SkipCardUnavailable);
    }
    effects.spend();
    state.log("Skip Card: Question skipped!");

    let mut events = vec![GameEvent::SkipCardUsed];
    events.extend(attack(state, true, None, now, rng)?);
    Ok(events)
}

/// Pay half of each currency to respawn, fully healed, at the last checkpoint.
pub fn revive_at_checkpoint(state: &mut GameState) -> Result<Vec<GameEvent>, Rejection> {
    if state.in_combat {
        return Err(Rejection::AlreadyInCombat);
    }
    if state.adventure_skills.show_selection_modal {
        return Err(Rejection::SkillSelectionOpen);
    }
    let (coins_lost, gems_lost) = revival_cost(state.coins, state.gems);
    if state.coins < coins_lost {
        return Err(Rejection::InsufficientCoins {
            needed: coins_lost,
            available: state.coins,
        });
    }
    if state.gems < gems_lost {
        return Err(Rejection::InsufficientGems {
            needed: gems_lost,
            available: state.gems,
        });
    }

    let zone = checkpoint_zone(state.zone);
    state.coins -= coins_lost;
    state.gems -= gems_lost;
    state.zone = zone;
    state.player_stats.full_heal();
    state.clear_combat();
    state.adventure_skills = AdventureSkills::default();
    state.has_used_revival = false;
    state.statistics.revivals += 1;
    state.combat_log = vec![format!(
        "You have been revived at checkpoint Zone {zone}! Lost {coins_lost} coins and {gems_lost} gems."
    )];

    Ok(vec![GameEvent::RevivedAtCheckpoint {
        zone,
        coins_lost,
        gems_lost,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::StandardContent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn in_combat_with(enemy: Enemy) -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.current_enemy = Some(enemy);
        state.in_combat = true;
        state
    }

    #[test]
    fn test_attack_outside_combat_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        assert_eq!(
            attack(&mut state, true, None, 0, &mut rng),
            Err(Rejection::NotInCombat)
        );
    }

    #[test]
    fn test_wrong_answer_resets_streak_and_deals_damage() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Goblin".to_string(), 1, 100, 25, 0));
        state.knowledge_streak.record_correct();

        attack(&mut state, false, Some("history"), 0, &mut rng).unwrap();

        assert_eq!(state.player_stats.hp, 85);
        assert_eq!(state.knowledge_streak.current, 0);
        assert_eq!(state.knowledge_streak.multiplier, 1.0);
        assert_eq!(state.statistics.accuracy_by_category["history"].total, 1);
        assert_eq!(state.statistics.accuracy_by_category["history"].correct, 0);
    }

    #[test]
    fn test_poison_ticks_after_hit() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Troll".to_string(), 1, 200, 5, 0));
        state.adventure_skills.skill_effects = SkillEffects::activate(AdventureSkillType::PoisonBlade);

        attack(&mut state, true, None, 0, &mut rng).unwrap();
        let enemy = state.current_enemy.as_ref().unwrap();
        // 20 from the hit, 20 from the first poison tick
        assert_eq!(enemy.hp, 160);
        assert_eq!(enemy.poison_turns, 2);
        assert!(enemy.is_poisoned);
    }

    #[test]
    fn test_poison_expires_after_three_ticks() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut enemy = Enemy::new("Troll".to_string(), 1, 1000, 1, 0);
        enemy.apply_poison(3);
        let mut state = in_combat_with(enemy);
        state.player_stats.def = 100;

        for _ in 0..3 {
            attack(&mut state, false, None, 0, &mut rng).unwrap();
        }
        let enemy = state.current_enemy.as_ref().unwrap();
        assert!(!enemy.is_poisoned);
        assert_eq!(enemy.hp, 700);
    }

    #[test]
    fn test_poison_kill_counts_as_victory() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut enemy = Enemy::new("Slime".to_string(), 1, 100, 1, 0);
        enemy.hp = 5;
        enemy.apply_poison(3);
        let mut state = in_combat_with(enemy);
        state.player_stats.def = 100;

        let events = attack(&mut state, false, None, 0, &mut rng).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDefeated { .. })));
        assert_eq!(state.zone, 2);
        assert!(!state.in_combat);
        assert!(state.current_enemy.is_none());
    }

    #[test]
    fn test_defeat_clears_combat() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Dragon".to_string(), 1, 100, 500, 0));
        attack(&mut state, false, None, 0, &mut rng).unwrap();
        assert_eq!(state.player_stats.hp, 0);
        assert!(!state.in_combat);
        assert!(state.current_enemy.is_none());
        assert_eq!(state.statistics.total_deaths, 1);
    }

    #[test]
    fn test_shadow_step_spent_after_first_miss() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Wraith".to_string(), 1, 100, 30, 0));
        state.adventure_skills.skill_effects = SkillEffects::activate(AdventureSkillType::ShadowStep);

        attack(&mut state, false, None, 0, &mut rng).unwrap();
        assert_eq!(state.player_stats.hp, 100);
        assert!(state.adventure_skills.skill_effects.spent);

        attack(&mut state, false, None, 0, &mut rng).unwrap();
        assert_eq!(state.player_stats.hp, 80);
    }

    #[test]
    fn test_vampiric_and_regen_stack() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Bat".to_string(), 1, 500, 1, 0));
        state.adventure_skills.skill_effects = SkillEffects::activate(AdventureSkillType::Vampiric);
        state.player_stats.hp = 50;

        attack(&mut state, true, None, 0, &mut rng).unwrap();
        // 50 + floor(20 * 0.25) + floor(100 * 0.05)
        assert_eq!(state.player_stats.hp, 60);
    }

    #[test]
    fn test_start_combat_opens_selection() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.adventure_skills.skill_effects = SkillEffects::activate(AdventureSkillType::Phoenix);

        start_combat(&mut state, 50, &mut rng).unwrap();
        assert!(state.adventure_skills.show_selection_modal);
        assert_eq!(state.adventure_skills.available_skills.len(), 3);
        assert_eq!(state.adventure_skills.skill_effects, SkillEffects::default());
        assert!(!state.in_combat);
    }

    #[test]
    fn test_select_without_round_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        assert_eq!(
            select_adventure_skill(&mut state, "skill_0_0", &StandardContent, &mut rng),
            Err(Rejection::NoSkillSelection)
        );
    }

    #[test]
    fn test_skip_spawns_enemy_with_fresh_log() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.combat_log = vec!["old line".to_string()];
        start_combat(&mut state, 0, &mut rng).unwrap();
        skip_adventure_skills(&mut state, &StandardContent, &mut rng).unwrap();

        assert!(state.in_combat);
        assert!(state.current_enemy.is_some());
        assert_eq!(state.combat_log.len(), 1);
        assert!(state.combat_log[0].starts_with("You encounter a "));
        assert_eq!(state.adventure_skills.skill_effects.active, None);
    }

    #[test]
    fn test_select_berserker_reshapes_stats() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        start_combat(&mut state, 0, &mut rng).unwrap();
        state.adventure_skills.available_skills[0].skill_type = AdventureSkillType::Berserker;
        let id = state.adventure_skills.available_skills[0].id.clone();

        let events = select_adventure_skill(&mut state, &id, &StandardContent, &mut rng).unwrap();
        assert_eq!(
            events[0],
            GameEvent::SkillSelected {
                skill: AdventureSkillType::Berserker
            }
        );
        assert_eq!(state.player_stats.atk, 40);
        assert_eq!(state.player_stats.def, 5);
        assert!(state.adventure_skills.skill_effects.is_active(AdventureSkillType::Berserker));
    }

    #[test]
    fn test_skip_card_answers_correctly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = in_combat_with(Enemy::new("Orc".to_string(), 1, 500, 1, 0));
        state.adventure_skills.skill_effects = SkillEffects::activate(AdventureSkillType::SkipCard);

        use_skip_card(&mut state, 0, &mut rng).unwrap();
        assert_eq!(state.current_enemy.as_ref().unwrap().hp, 480);
        assert_eq!(state.knowledge_streak.current, 1);
        assert_eq!(
            use_skip_card(&mut state, 0, &mut rng),
            Err(Rejection::SkipCardUnavailable)
        );
    }

    #[test]
    fn test_revive_rejected_mid_combat() {
        let mut state = in_combat_with(Enemy::new("Orc".to_string(), 1, 50, 1, 0));
        assert_eq!(revive_at_checkpoint(&mut state), Err(Rejection::AlreadyInCombat));
    }

    #[test]
    fn test_revive_rejected_while_choosing_skill() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.zone = 8;
        start_combat(&mut state, 0, &mut rng).unwrap();

        assert_eq!(
            revive_at_checkpoint(&mut state),
            Err(Rejection::SkillSelectionOpen)
        );
        assert_eq!(state.coins, 500);
        assert_eq!(state.zone, 8);
    }

    #[test]
    fn test_revive_clears_revival_flag() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut state = GameState::new(0, &StandardContent, &mut rng);
        state.zone = 8;
        state.has_used_revival = true;

        revive_at_checkpoint(&mut state).unwrap();
        assert!(!state.has_used_revival);
        assert_eq!(state.zone, 6);
        assert_eq!(state.coins, 250);
    }
}
