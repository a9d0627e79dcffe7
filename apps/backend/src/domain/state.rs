use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, PlayedCard, Suit};

/// Stable, client-supplied player identity.
pub type PlayerId = String;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Lobby; players may still join.
    Waiting,
    /// Players bet in seat order.
    Betting,
    /// Tricks are being played.
    Playing,
    /// Kept for wire compatibility; the engine never enters it.
    TrickEnd,
    /// Round scored; waiting for every player to be ready.
    RoundEnd,
    /// All rounds complete.
    GameEnd,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    pub seat_index: usize,
    pub hand: Vec<Card>,
    /// `None` until the player bets this round.
    pub bet: Option<u8>,
    pub tricks_won: u8,
    pub score: i32,
    pub connected: bool,
    pub is_host: bool,
    #[serde(default)]
    pub is_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<Difficulty>,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        nickname: impl Into<String>,
        seat_index: usize,
        is_host: bool,
    ) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
            seat_index,
            hand: Vec::new(),
            bet: None,
            tricks_won: 0,
            score: 0,
            connected: true,
            is_host,
            is_ai: false,
            ai_difficulty: None,
        }
    }

    pub fn new_ai(
        id: impl Into<PlayerId>,
        nickname: impl Into<String>,
        seat_index: usize,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            is_ai: true,
            ai_difficulty: Some(difficulty),
            ..Self::new(id, nickname, seat_index, false)
        }
    }

    fn reset_for_round(&mut self, hand: Vec<Card>) {
        self.hand = hand;
        self.bet = None;
        self.tricks_won = 0;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    pub cards: Vec<PlayedCard>,
    pub lead_suit: Option<Suit>,
    /// Set once every player has played; the trick then waits to be cleared.
    pub winner_id: Option<PlayerId>,
}

impl Trick {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn awaiting_clear(&self) -> bool {
        self.winner_id.is_some()
    }

    pub fn has_played(&self, who: &str) -> bool {
        self.cards.iter().any(|c| c.player_id == who)
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: String,
    pub phase: Phase,
    /// Ordered by seat index.
    pub players: Vec<Player>,
    /// Index into the round schedule.
    pub current_round: usize,
    pub cards_per_player: u8,
    pub is_blind_round: bool,
    pub current_trick: Trick,
    /// Player whose action is awaited; `None` when nobody can act.
    pub current_player_id: Option<PlayerId>,
    /// Player who leads the first trick of the round.
    pub round_leader_id: Option<PlayerId>,
    pub total_bets: u16,
    pub ready_for_next_round: Vec<PlayerId>,
    /// Winner of the last trick of the previous round; leads the next one.
    pub last_round_winner_id: Option<PlayerId>,
    /// Seat rotation starting from whoever leads next.
    pub play_order: Vec<PlayerId>,
}

impl GameState {
    /// Lobby aggregate for the given players. Players are placed in seat order.
    pub fn new_lobby(id: impl Into<String>, mut players: Vec<Player>) -> Self {
        players.sort_by_key(|p| p.seat_index);
        let play_order = players.iter().map(|p| p.id.clone()).collect();
        Self {
            id: id.into(),
            phase: Phase::Waiting,
            players,
            current_round: 0,
            cards_per_player: 0,
            is_blind_round: false,
            current_trick: Trick::default(),
            current_player_id: None,
            round_leader_id: None,
            total_bets: 0,
            ready_for_next_round: Vec::new(),
            last_round_winner_id: None,
            play_order,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id.as_deref().and_then(|id| self.player(id))
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current_player_id.as_deref() == Some(id)
    }

    /// Next player clockwise by seat, wrapping around.
    pub fn next_player_after(&self, id: &str) -> Option<PlayerId> {
        let idx = self.player_index(id)?;
        let next = (idx + 1) % self.players.len();
        Some(self.players[next].id.clone())
    }

    /// Seat rotation beginning with `first`.
    pub fn rotation_from(&self, first: &str) -> Vec<PlayerId> {
        let start = self.player_index(first).unwrap_or(0);
        let n = self.players.len();
        (0..n)
            .map(|i| self.players[(start + i) % n].id.clone())
            .collect()
    }

    pub fn all_bets_placed(&self) -> bool {
        self.players.iter().all(|p| p.bet.is_some())
    }

    pub fn all_hands_empty(&self) -> bool {
        self.players.iter().all(|p| p.hand.is_empty())
    }

    pub fn everyone_ready(&self) -> bool {
        self.players
            .iter()
            .all(|p| self.ready_for_next_round.contains(&p.id))
    }

    pub(crate) fn deal_round(&mut self, hands: Vec<Vec<Card>>) {
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.reset_for_round(hand);
        }
    }
}
