//! Local session host: one human against AI opponents, no transport.
//!
//! The host owns the only `GameState`. Human intents arrive through direct
//! method calls; AI intents arrive from the turn timer and go through the
//! same `place_bet` / `play_card` entry points. Every applied intent
//! notifies subscribers with the human's personalized view, in order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::ai::{create_ai, decide_bet, decide_play, AiPlayer, PlayChoice, AI_NAMES};
use crate::config::local::{LocalGameConfig, MAX_AI_OPPONENTS, MIN_AI_OPPONENTS};
use crate::domain::{
    clear_trick, mark_ready, personalize, place_bet, play_card, start_game, AiView, CardId,
    GameState, Phase, Player, PlayerId,
};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::scheduler::{thinking_delay, DelayedTask};

pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&GameState) + Send + Sync>;

const LOCAL_GAME_ID: &str = "local";

struct Inner {
    state: GameState,
    ais: HashMap<PlayerId, Box<dyn AiPlayer>>,
    rng: StdRng,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    processing: bool,
    destroyed: bool,
}

struct Shared {
    config: LocalGameConfig,
    inner: ReentrantMutex<RefCell<Inner>>,
    ai_turn: DelayedTask,
    trick_clear: DelayedTask,
}

/// Clears the in-progress flag when the intent finishes, however it exits.
struct ProcessingFlag<'a>(&'a RefCell<Inner>);

impl Drop for ProcessingFlag<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.processing = false;
        }
    }
}

enum AiIntent {
    Bet(u8),
    Play(PlayChoice),
}

/// Handle to a local game. Clones share the same game.
#[derive(Clone)]
pub struct LocalGame {
    shared: Arc<Shared>,
}

impl LocalGame {
    /// Seat the human at seat 0 (host) and `ai_count` AI players after them.
    /// Must be used from within a tokio runtime once the game starts.
    pub fn new(config: LocalGameConfig) -> Result<Self, DomainError> {
        if config.ai_count < MIN_AI_OPPONENTS {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!("At least {MIN_AI_OPPONENTS} AI opponent is required"),
            ));
        }
        if config.ai_count > MAX_AI_OPPONENTS {
            return Err(DomainError::validation(
                ValidationKind::TooManyPlayers,
                format!("At most {MAX_AI_OPPONENTS} AI opponents are supported"),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut players = vec![Player::new(
            config.human_player_id.clone(),
            config.human_nickname.clone(),
            0,
            true,
        )];
        let mut ais: HashMap<PlayerId, Box<dyn AiPlayer>> = HashMap::new();
        let names: Vec<&str> = AI_NAMES
            .choose_multiple(&mut rng, config.ai_count)
            .copied()
            .collect();
        for (i, name) in names.into_iter().enumerate() {
            let seat = i + 1;
            let id = format!("ai-{seat}");
            let ai_seed = config.seed.map(|s| s.wrapping_add(seat as u64));
            ais.insert(id.clone(), create_ai(config.ai_difficulty, ai_seed));
            players.push(Player::new_ai(id, name, seat, config.ai_difficulty));
        }

        info!(
            human = %config.human_player_id,
            ai_count = config.ai_count,
            difficulty = %config.ai_difficulty,
            "[LOCAL GAME] created"
        );

        let inner = Inner {
            state: GameState::new_lobby(LOCAL_GAME_ID, players),
            ais,
            rng,
            listeners: Vec::new(),
            next_subscription: 0,
            processing: false,
            destroyed: false,
        };
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                inner: ReentrantMutex::new(RefCell::new(inner)),
                ai_turn: DelayedTask::new("ai_turn"),
                trick_clear: DelayedTask::new("trick_clear"),
            }),
        })
    }

    pub fn human_player_id(&self) -> &str {
        &self.shared.config.human_player_id
    }

    /// Register a callback for every state change. Nothing is delivered
    /// until the next change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameState) + Send + Sync + 'static,
    {
        let guard = self.shared.inner.lock();
        let mut inner = guard.borrow_mut();
        let id = inner.next_subscription;
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let guard = self.shared.inner.lock();
        let mut inner = guard.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sub, _)| *sub != id);
        inner.listeners.len() != before
    }

    /// Each intent returns whether it was applied; rejected intents leave
    /// the state untouched and notify nobody.
    pub fn start_game(&self) -> bool {
        self.shared
            .apply("start_game", |inner| {
                start_game(&mut inner.state, &mut inner.rng)
            })
            .is_some()
    }

    pub fn place_bet(&self, who: &str, bet: u8) -> bool {
        self.shared.place_bet(who, bet)
    }

    pub fn play_card(&self, who: &str, card_id: &CardId, ace_is_high: Option<bool>) -> bool {
        self.shared.play_card(who, card_id, ace_is_high)
    }

    pub fn mark_ready(&self, who: &str) -> bool {
        self.shared
            .apply("mark_ready", |inner| {
                mark_ready(&mut inner.state, who, &mut inner.rng)
            })
            .is_some()
    }

    /// The state as the human is allowed to see it.
    pub fn state(&self) -> GameState {
        let guard = self.shared.inner.lock();
        let inner = guard.borrow();
        personalize(&inner.state, &self.shared.config.human_player_id)
    }

    /// Unmasked state, for tests and debugging.
    pub fn full_state(&self) -> GameState {
        let guard = self.shared.inner.lock();
        let inner = guard.borrow();
        inner.state.clone()
    }

    /// Cancel pending timers and drop all listeners. Later intents are ignored.
    pub fn destroy(&self) {
        let guard = self.shared.inner.lock();
        {
            let mut inner = guard.borrow_mut();
            inner.destroyed = true;
            inner.listeners.clear();
        }
        self.shared.ai_turn.cancel();
        self.shared.trick_clear.cancel();
        info!("[LOCAL GAME] destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.inner.lock().borrow().destroyed
    }
}

impl Shared {
    fn place_bet(self: &Arc<Self>, who: &str, bet: u8) -> bool {
        self.apply("place_bet", |inner| place_bet(&mut inner.state, who, bet))
            .is_some()
    }

    fn play_card(self: &Arc<Self>, who: &str, card_id: &CardId, ace_is_high: Option<bool>) -> bool {
        self.apply("play_card", |inner| {
            let outcome = play_card(&mut inner.state, who, card_id, ace_is_high)?;
            if outcome.round_ended && !outcome.game_ended {
                ready_ai_players(inner);
            }
            Ok(outcome)
        })
        .is_some()
    }

    fn clear_trick(self: &Arc<Self>) {
        self.apply("clear_trick", |inner| clear_trick(&mut inner.state));
    }

    /// Run one intent under the game lock: check-and-set the in-progress
    /// flag, mutate, notify listeners, then re-arm timers.
    fn apply<T>(
        self: &Arc<Self>,
        intent: &'static str,
        op: impl FnOnce(&mut Inner) -> Result<T, DomainError>,
    ) -> Option<T> {
        let guard = self.inner.lock();
        let cell: &RefCell<Inner> = &guard;
        {
            let mut inner = cell.borrow_mut();
            if inner.destroyed {
                debug!(intent, "[LOCAL GAME] intent ignored after destroy");
                return None;
            }
            if inner.processing {
                debug!(intent, "[LOCAL GAME] intent dropped: another action is in progress");
                return None;
            }
            inner.processing = true;
        }
        let flag = ProcessingFlag(cell);

        let applied = {
            let mut inner = cell.borrow_mut();
            op(&mut inner).map(|value| {
                let view = personalize(&inner.state, &self.config.human_player_id);
                let listeners: Vec<Listener> =
                    inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
                (value, view, listeners)
            })
        };
        let (value, view, listeners) = match applied {
            Ok(applied) => applied,
            Err(err) => {
                report_rejection(intent, &err);
                return None;
            }
        };

        for listener in &listeners {
            listener(&view);
        }
        drop(flag);

        self.schedule(cell);
        Some(value)
    }

    /// Arm the trick-clear timer when a finished trick is on the table,
    /// otherwise arm the AI turn timer when an AI is due to act.
    fn schedule(self: &Arc<Self>, cell: &RefCell<Inner>) {
        let mut inner = cell.borrow_mut();
        if inner.destroyed {
            return;
        }

        let state = &inner.state;
        if state.phase == Phase::Playing && state.current_trick.awaiting_clear() {
            self.ai_turn.cancel();
            let weak = Arc::downgrade(self);
            self.trick_clear.arm(self.config.trick_clear_delay, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.clear_trick();
                }
            });
            return;
        }

        let acting_ai = match state.phase {
            Phase::Betting | Phase::Playing => state
                .current_player()
                .filter(|p| p.is_ai)
                .map(|p| p.id.clone()),
            _ => None,
        };
        let Some(ai_id) = acting_ai else {
            self.ai_turn.cancel();
            return;
        };

        let delay = thinking_delay(self.config.ai_difficulty, &mut inner.rng);
        debug!(player_id = %ai_id, delay_ms = delay.as_millis() as u64, "[LOCAL GAME] AI turn scheduled");
        let weak = Arc::downgrade(self);
        self.ai_turn.arm(delay, move || {
            if let Some(shared) = weak.upgrade() {
                shared.take_ai_turn(&ai_id);
            }
        });
    }

    fn take_ai_turn(self: &Arc<Self>, who: &str) {
        let decision = {
            let guard = self.inner.lock();
            let inner = guard.borrow();
            if inner.destroyed || !inner.state.is_current(who) {
                return;
            }
            let (Some(view), Some(ai)) = (AiView::for_player(&inner.state, who), inner.ais.get(who))
            else {
                warn!(player_id = who, "[LOCAL GAME] no AI registered for current player");
                return;
            };
            match inner.state.phase {
                Phase::Betting => decide_bet(ai.as_ref(), &view).map(AiIntent::Bet),
                Phase::Playing => decide_play(ai.as_ref(), &view).map(AiIntent::Play),
                _ => None,
            }
        };

        match decision {
            Some(AiIntent::Bet(bet)) => {
                self.place_bet(who, bet);
            }
            Some(AiIntent::Play(choice)) => {
                self.play_card(who, &choice.card_id, choice.ace_is_high);
            }
            None => debug!(player_id = who, "[LOCAL GAME] AI had no action"),
        }
    }
}

/// AI players never hold up the ready gate.
fn ready_ai_players(inner: &mut Inner) {
    let ai_ids: Vec<PlayerId> = inner
        .state
        .players
        .iter()
        .filter(|p| p.is_ai)
        .map(|p| p.id.clone())
        .collect();
    for id in ai_ids {
        if let Err(err) = mark_ready(&mut inner.state, &id, &mut inner.rng) {
            warn!(player_id = %id, error = %err, "[LOCAL GAME] could not ready AI player");
        }
    }
}

fn report_rejection(intent: &'static str, err: &DomainError) {
    if err.is_invariant() {
        error!(intent, error = %err, "[LOCAL GAME] invariant violated");
        debug_assert!(false, "invariant violated during {intent}: {err}");
    } else {
        debug!(intent, error = %err, "[LOCAL GAME] intent dropped");
    }
}
