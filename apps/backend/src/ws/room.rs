//! A multiplayer room: roster, optional game, and the sockets watching it.
//!
//! All mutation happens under the room lock, and every outbound message is
//! handed to its socket while that lock is still held, so each viewer sees
//! states in the order they were produced. `place_bet`, `play_card` and
//! admin `skip_turn` additionally take the room's action flag and are
//! dropped, not queued, when another action holds it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::domain::{
    clear_trick, mark_ready, personalize, place_bet, play_card, set_connected, skip_round,
    skip_turn, start_game, CardId, GameState, Phase, Player, PlayerId, SkipOutcome,
};
use crate::errors::domain::DomainError;
use crate::services::scheduler::DelayedTask;
use crate::ws::protocol::{AdminAction, ServerMsg};

/// Outbound channel to one connected socket.
pub trait ViewerSink: Send + Sync {
    /// Queue `msg` for delivery; false if the socket is gone.
    fn send(&self, msg: ServerMsg) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSettings {
    pub max_players: usize,
    pub trick_clear_delay: Duration,
    pub admin_trick_clear_delay: Duration,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for RoomSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_players: config.max_players,
            trick_clear_delay: config.trick_clear_delay,
            admin_trick_clear_delay: config.admin_trick_clear_delay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("Room is full (max {max} players)")]
    RoomFull { max: usize },
    #[error("Game already started")]
    GameStarted,
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    #[error("Only the host can use this function")]
    NotHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    New,
    Reconnected,
}

/// Public lobby view used by the HTTP API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub code: String,
    pub players: Vec<PlayerSummary>,
    pub phase: Option<Phase>,
    pub current_round: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub nickname: String,
    pub seat_index: usize,
    pub connected: bool,
    pub is_host: bool,
}

struct Connection {
    player_id: Option<PlayerId>,
    sink: Arc<dyn ViewerSink>,
}

struct RoomInner {
    roster: Vec<Player>,
    game: Option<GameState>,
    host_id: Option<PlayerId>,
    connections: HashMap<Uuid, Connection>,
    /// Bumped on reset so timers armed for an earlier game do nothing.
    generation: u64,
    last_activity: Instant,
}

/// Held while one state-mutating action runs; released on drop.
struct ActionGuard<'a>(&'a AtomicBool);

impl<'a> ActionGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Room {
    code: String,
    settings: RoomSettings,
    inner: Mutex<RoomInner>,
    busy: AtomicBool,
    trick_clear: DelayedTask,
}

impl Room {
    pub fn new(code: impl Into<String>, settings: RoomSettings) -> Self {
        Self {
            code: code.into(),
            settings,
            inner: Mutex::new(RoomInner {
                roster: Vec::new(),
                game: None,
                host_id: None,
                connections: HashMap::new(),
                generation: 0,
                last_activity: Instant::now(),
            }),
            busy: AtomicBool::new(false),
            trick_clear: DelayedTask::new("room_trick_clear"),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Seat `player_id`, or reattach it when already seated. On success
    /// the joiner receives `room_state` and the others are notified.
    pub fn join(
        &self,
        conn_id: Uuid,
        sink: Arc<dyn ViewerSink>,
        player_id: &str,
        nickname: &str,
    ) -> Result<JoinKind, JoinError> {
        if player_id.trim().is_empty() {
            return Err(JoinError::Invalid("Player id is required".into()));
        }
        if nickname.trim().is_empty() {
            return Err(JoinError::Invalid("Nickname is required".into()));
        }

        let mut inner = self.inner.lock();
        inner.last_activity = Instant::now();

        if let Some(existing) = inner.roster.iter_mut().find(|p| p.id == player_id) {
            existing.connected = true;
            existing.nickname = nickname.to_string();
            if let Some(game) = inner.game.as_mut() {
                if let Some(seated) = game.player_mut(player_id) {
                    seated.connected = true;
                }
            }
            inner.connections.insert(
                conn_id,
                Connection {
                    player_id: Some(player_id.to_string()),
                    sink: Arc::clone(&sink),
                },
            );
            sink.send(self.room_state_for(&inner, player_id));
            self.broadcast_game(&inner);
            info!(room_code = %self.code, player_id, "[ROOM] player reconnected");
            return Ok(JoinKind::Reconnected);
        }

        if inner.roster.len() >= self.settings.max_players {
            return Err(JoinError::RoomFull {
                max: self.settings.max_players,
            });
        }
        if inner.game.is_some() {
            return Err(JoinError::GameStarted);
        }

        let is_host = inner.roster.is_empty();
        let player = Player::new(player_id, nickname, inner.roster.len(), is_host);
        if is_host {
            inner.host_id = Some(player_id.to_string());
        }
        inner.roster.push(player.clone());
        inner.connections.insert(
            conn_id,
            Connection {
                player_id: Some(player_id.to_string()),
                sink: Arc::clone(&sink),
            },
        );

        sink.send(self.room_state_for(&inner, player_id));
        Self::send_to_others(&inner, conn_id, ServerMsg::PlayerJoined { player });
        info!(
            room_code = %self.code,
            player_id,
            players = inner.roster.len(),
            "[ROOM] player joined"
        );
        Ok(JoinKind::New)
    }

    /// Bind (or rebind) the player a connection speaks for.
    pub fn register_player(&self, conn_id: Uuid, player_id: &str) {
        let mut inner = self.inner.lock();
        if let Some(conn) = inner.connections.get_mut(&conn_id) {
            conn.player_id = Some(player_id.to_string());
        }
    }

    pub fn start_game(&self, who: &str) -> bool {
        let mut inner = self.inner.lock();
        if inner.host_id.as_deref() != Some(who) {
            debug!(room_code = %self.code, player_id = who, "[ROOM] start_game dropped: not host");
            return false;
        }
        if inner
            .game
            .as_ref()
            .is_some_and(|g| g.phase != Phase::GameEnd)
        {
            debug!(room_code = %self.code, "[ROOM] start_game dropped: game in progress");
            return false;
        }

        let mut game = GameState::new_lobby(self.code.clone(), inner.roster.clone());
        if let Err(err) = start_game(&mut game, &mut rand::rng()) {
            self.report_rejection("start_game", &err);
            return false;
        }
        inner.game = Some(game);
        inner.last_activity = Instant::now();
        info!(room_code = %self.code, players = inner.roster.len(), "[ROOM] game started");
        self.broadcast_game(&inner);
        true
    }

    /// `bet` is the raw wire value; anything outside `u8` is dropped.
    pub fn place_bet(self: &Arc<Self>, who: &str, bet: i32) -> bool {
        let Ok(bet) = u8::try_from(bet) else {
            debug!(room_code = %self.code, player_id = who, bet, "[ROOM] place_bet dropped: out of range");
            return false;
        };
        self.with_action("place_bet", |game| place_bet(game, who, bet).map(|_| None))
    }

    pub fn play_card(self: &Arc<Self>, who: &str, card_id: &CardId, ace_is_high: Option<bool>) -> bool {
        let delay = self.settings.trick_clear_delay;
        self.with_action("play_card", |game| {
            play_card(game, who, card_id, ace_is_high)
                .map(|outcome| outcome.needs_trick_clear.then_some(delay))
        })
    }

    pub fn player_ready(&self, who: &str) -> bool {
        let mut inner = self.inner.lock();
        let Some(game) = inner.game.as_mut() else {
            return false;
        };
        if let Err(err) = mark_ready(game, who, &mut rand::rng()) {
            self.report_rejection("player_ready", &err);
            return false;
        }
        inner.last_activity = Instant::now();
        self.broadcast_game(&inner);
        true
    }

    /// Host-only shortcuts. `Ok(false)` means the action had nothing to do.
    pub fn admin_skip(self: &Arc<Self>, who: &str, action: AdminAction) -> Result<bool, AdminError> {
        {
            let inner = self.inner.lock();
            if inner.game.is_none() {
                return Ok(false);
            }
            if inner.host_id.as_deref() != Some(who) {
                return Err(AdminError::NotHost);
            }
        }
        info!(room_code = %self.code, player_id = who, ?action, "[ROOM] admin action");

        let applied = match action {
            AdminAction::SkipTurn => {
                let delay = self.settings.admin_trick_clear_delay;
                self.with_action("skip_turn", |game| {
                    skip_turn(game).map(|skip| match skip {
                        SkipOutcome::Play { outcome, .. } => {
                            outcome.needs_trick_clear.then_some(delay)
                        }
                        SkipOutcome::Bet { .. } => None,
                    })
                })
            }
            AdminAction::SkipRound => {
                let mut inner = self.inner.lock();
                let result = inner.game.as_mut().map(skip_round);
                match result {
                    Some(Ok(_)) => {
                        self.trick_clear.cancel();
                        inner.last_activity = Instant::now();
                        self.broadcast_game(&inner);
                        true
                    }
                    Some(Err(err)) => {
                        self.report_rejection("skip_round", &err);
                        false
                    }
                    None => false,
                }
            }
            AdminAction::ResetGame => {
                self.reset_game();
                true
            }
        };
        Ok(applied)
    }

    fn reset_game(&self) {
        let mut inner = self.inner.lock();
        inner.game = None;
        inner.generation += 1;
        inner.last_activity = Instant::now();
        self.trick_clear.cancel();
        for conn in inner.connections.values() {
            let viewer = conn.player_id.as_deref().unwrap_or_default();
            conn.sink.send(self.room_state_for(&inner, viewer));
        }
        info!(room_code = %self.code, "[ROOM] game reset");
    }

    /// Socket closed. The seat is kept; the player is only marked offline
    /// once none of their sockets remain.
    pub fn disconnect(&self, conn_id: Uuid) {
        let mut inner = self.inner.lock();
        let Some(conn) = inner.connections.remove(&conn_id) else {
            return;
        };
        inner.last_activity = Instant::now();
        let Some(player_id) = conn.player_id else {
            return;
        };
        let still_connected = inner
            .connections
            .values()
            .any(|c| c.player_id.as_deref() == Some(player_id.as_str()));
        if still_connected {
            debug!(room_code = %self.code, player_id = %player_id, "[ROOM] stale socket closed");
            return;
        }

        let Some(member) = inner.roster.iter_mut().find(|p| p.id == player_id) else {
            return;
        };
        member.connected = false;
        info!(room_code = %self.code, player_id = %player_id, "[ROOM] player disconnected");

        match inner.game.as_mut() {
            Some(game) => {
                if let Err(err) = set_connected(game, &player_id, false) {
                    self.report_rejection("disconnect", &err);
                }
                self.broadcast_game(&inner);
            }
            None => {
                Self::send_to_others(&inner, conn_id, ServerMsg::PlayerDisconnected { player_id });
            }
        }
    }

    pub fn summary(&self) -> RoomSummary {
        let inner = self.inner.lock();
        RoomSummary {
            code: self.code.clone(),
            players: inner
                .roster
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    nickname: p.nickname.clone(),
                    seat_index: p.seat_index,
                    connected: p.connected,
                    is_host: p.is_host,
                })
                .collect(),
            phase: inner.game.as_ref().map(|g| g.phase),
            current_round: inner.game.as_ref().map(|g| g.current_round),
        }
    }

    /// Unmasked game state, if a game exists.
    pub fn game_state(&self) -> Option<GameState> {
        self.inner.lock().game.clone()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.lock().connections.len()
    }

    /// No sockets attached and nothing has happened for `max_idle`.
    pub fn is_idle(&self, max_idle: Duration) -> bool {
        let inner = self.inner.lock();
        inner.connections.is_empty() && inner.last_activity.elapsed() >= max_idle
    }

    /// Run one serialized action against the live game. `op` returns the
    /// trick-clear delay to arm when its action completed a trick.
    fn with_action<F>(self: &Arc<Self>, intent: &'static str, op: F) -> bool
    where
        F: FnOnce(&mut GameState) -> Result<Option<Duration>, DomainError>,
    {
        let Some(_guard) = ActionGuard::try_acquire(&self.busy) else {
            debug!(room_code = %self.code, intent, "[ROOM] intent dropped: action in progress");
            return false;
        };

        let mut inner = self.inner.lock();
        let Some(game) = inner.game.as_mut() else {
            debug!(room_code = %self.code, intent, "[ROOM] intent dropped: no game");
            return false;
        };
        let clear_after = match op(game) {
            Ok(clear_after) => clear_after,
            Err(err) => {
                self.report_rejection(intent, &err);
                return false;
            }
        };
        inner.last_activity = Instant::now();
        self.broadcast_game(&inner);

        if let Some(delay) = clear_after {
            self.schedule_trick_clear(inner.generation, delay);
        }
        true
    }

    fn schedule_trick_clear(self: &Arc<Self>, generation: u64, delay: Duration) {
        let weak = Arc::downgrade(self);
        self.trick_clear.arm(delay, move || {
            if let Some(room) = weak.upgrade() {
                room.clear_trick(generation);
            }
        });
    }

    fn clear_trick(&self, generation: u64) {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(room_code = %self.code, "[ROOM] trick clear skipped: game was reset");
            return;
        }
        let Some(game) = inner.game.as_mut() else {
            return;
        };
        if let Err(err) = clear_trick(game) {
            self.report_rejection("clear_trick", &err);
            return;
        }
        self.broadcast_game(&inner);
    }

    fn room_state_for(&self, inner: &RoomInner, viewer: &str) -> ServerMsg {
        ServerMsg::RoomState {
            players: inner.roster.clone(),
            game_state: inner.game.as_ref().map(|g| personalize(g, viewer)),
            is_host: inner.host_id.as_deref() == Some(viewer),
        }
    }

    /// Push each seated viewer their own personalized state.
    fn broadcast_game(&self, inner: &RoomInner) {
        let Some(game) = inner.game.as_ref() else {
            return;
        };
        let expected = game.players.len();
        let mut sent = 0usize;
        for (conn_id, conn) in &inner.connections {
            let Some(player_id) = conn.player_id.as_deref() else {
                continue;
            };
            if game.player(player_id).is_none() {
                debug!(
                    room_code = %self.code,
                    conn_id = %conn_id,
                    player_id,
                    "[ROOM] socket bound to a player outside the game"
                );
                continue;
            }
            let msg = ServerMsg::GameState {
                game_state: personalize(game, player_id),
            };
            if conn.sink.send(msg) {
                sent += 1;
            }
        }
        if sent != expected {
            info!(room_code = %self.code, sent, expected, "[ROOM] partial broadcast");
        }
    }

    fn send_to_others(inner: &RoomInner, except: Uuid, msg: ServerMsg) {
        for (conn_id, conn) in &inner.connections {
            if *conn_id != except {
                conn.sink.send(msg.clone());
            }
        }
    }

    fn report_rejection(&self, intent: &'static str, err: &DomainError) {
        if err.is_invariant() {
            error!(room_code = %self.code, intent, error = %err, "[ROOM] invariant violated");
            debug_assert!(false, "invariant violated during {intent}: {err}");
        } else {
            debug!(room_code = %self.code, intent, error = %err, "[ROOM] intent dropped");
        }
    }
}
