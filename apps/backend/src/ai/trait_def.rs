//! AI player trait definition.

use std::fmt;

use crate::domain::player_view::AiView;
use crate::domain::CardId;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI failed to make a decision within timeout
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// A card to play plus the high/low choice when it is the Ace of Hearts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayChoice {
    pub card_id: CardId,
    pub ace_is_high: Option<bool>,
}

/// Trait for AI players.
///
/// Implementations receive what the acting player can see and must
/// choose a legal action from `view.legal_bets()` / `view.legal_plays()`.
pub trait AiPlayer: Send + Sync {
    fn choose_bet(&self, view: &AiView) -> Result<u8, AiError>;

    fn choose_play(&self, view: &AiView) -> Result<PlayChoice, AiError>;
}
