//! One scheduler pass over every wall-clock subsystem.
//!
//! Each check compares `now` to its own stored deadline and is a no-op until
//! that deadline passes, so polling more often than needed is harmless.

use super::daily::check_daily_reward;
use super::garden::grow_garden;
use super::market::refresh_market_if_due;
use super::offline::process_offline_progress;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::items::generation::ContentGenerator;
use rand::Rng;

/// Clear the active menu skill once `now >= expires_at`.
pub fn expire_menu_skill(state: &mut GameState, now: i64) -> Vec<GameEvent> {
    let skills = &mut state.skills;
    match skills.active_menu_skill.take() {
        Some(skill) if skill.is_expired(now) => vec![GameEvent::MenuSkillExpired {
            skill: skill.skill_type,
        }],
        other => {
            skills.active_menu_skill = other;
            Vec::new()
        }
    }
}

/// Run every timed check in a fixed order.
pub fn poll_timers<C: ContentGenerator, R: Rng>(
    state: &mut GameState,
    now: i64,
    content: &C,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // 1. Relic market rotation
    events.extend(refresh_market_if_due(state, now, content, rng));

    // 2. Menu skill expiry
    events.extend(expire_menu_skill(state, now));

    // 3. Garden growth
    events.extend(grow_garden(state, now));

    // 4. Offline accrual
    events.extend(process_offline_progress(state, now));

    // 5. Daily reward eligibility
    events.extend(check_daily_reward(state, now));

    if let Some(elapsed) = now.checked_sub(state.skills.session_start_time) {
        state.skills.play_time_this_session = elapsed.max(0) as u64;
    }

    events
}
