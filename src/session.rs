//! The single serialization point for a running game.
//!
//! User actions and timer polls both go through [`GameSession::dispatch`],
//! which holds one lock across the whole transition so a timer refresh can
//! never interleave with a purchase. Saves are handed to a background thread
//! and never block or roll back a transition.

use crate::core::engine::{apply, GameAction, Transition};
use crate::core::game_state::{GameState, Unlockable};
use crate::items::generation::ContentGenerator;
use crate::persistence::snapshot::{load_or_default, save_state};
use crate::persistence::store::SnapshotStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread::JoinHandle;

/// Which unlock list an evaluator maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockTarget {
    Achievements,
    PlayerTags,
}

/// An achievement or tag checker run after every accepted transition.
///
/// Returns the complete updated list for its target.
pub trait UnlockEvaluator: Send + Sync {
    fn target(&self) -> UnlockTarget;

    fn evaluate(&self, state: &GameState, now: i64) -> Vec<Unlockable>;
}

struct Slot {
    state: GameState,
    rng: ChaCha8Rng,
}

struct Saver {
    sender: Option<Sender<GameState>>,
    handle: Option<JoinHandle<()>>,
}

impl Saver {
    fn spawn(store: Box<dyn SnapshotStore>) -> Self {
        let (sender, receiver) = mpsc::channel::<GameState>();
        let handle = std::thread::spawn(move || {
            for state in receiver {
                if let Err(e) = save_state(store.as_ref(), &state) {
                    log::warn!("failed to save game state: {}", e);
                }
            }
        });
        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    fn submit(&self, state: GameState) {
        if let Some(sender) = &self.sender {
            if sender.send(state).is_err() {
                log::warn!("save worker has stopped; snapshot dropped");
            }
        }
    }
}

impl Drop for Saver {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain pending saves and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("save worker panicked");
            }
        }
    }
}

pub struct GameSession<C: ContentGenerator> {
    slot: Mutex<Slot>,
    content: C,
    evaluators: Vec<Box<dyn UnlockEvaluator>>,
    saver: Option<Saver>,
}

impl<C: ContentGenerator> GameSession<C> {
    /// Resume from `store` (or start fresh) and persist every accepted transition back to it.
    pub fn open(content: C, store: Box<dyn SnapshotStore>, seed: u64, now: i64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = load_or_default(store.as_ref(), now, &content, &mut rng);
        Self {
            slot: Mutex::new(Slot { state, rng }),
            content,
            evaluators: Vec::new(),
            saver: Some(Saver::spawn(store)),
        }
    }

    /// A session over `state` that never persists.
    pub fn detached(content: C, state: GameState, seed: u64) -> Self {
        Self {
            slot: Mutex::new(Slot {
                state,
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
            content,
            evaluators: Vec::new(),
            saver: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Box<dyn UnlockEvaluator>) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    pub fn snapshot(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Apply one action atomically against the current snapshot.
    pub fn dispatch(&self, action: &GameAction, now: i64) -> Transition {
        let mut slot = self.lock();
        let Slot { state, rng } = &mut *slot;
        let mut transition = apply(state, action, now, &self.content, rng);
        if !transition.accepted {
            return transition;
        }

        for evaluator in &self.evaluators {
            let updated = evaluator.evaluate(&transition.state, now);
            match evaluator.target() {
                UnlockTarget::Achievements => transition.state.achievements = updated,
                UnlockTarget::PlayerTags => transition.state.player_tags = updated,
            }
        }

        *state = transition.state.clone();
        if let Some(saver) = &self.saver {
            saver.submit(transition.state.clone());
        }
        transition
    }

    /// Timer entry point; meant to be called every `MARKET_POLL_INTERVAL_SECONDS`.
    pub fn poll(&self, now: i64) -> Transition {
        self.dispatch(&GameAction::Tick, now)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
