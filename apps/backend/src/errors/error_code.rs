//! Error codes for the Bisca backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP problem bodies. Add new codes here; never pass
//! ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General bad request error
    BadRequest,
    /// General validation error
    ValidationError,
    /// Action not allowed in the current phase
    PhaseMismatch,
    /// Action from a player who is not current
    OutOfTurn,
    /// Card not in hand
    CardNotInHand,
    /// Bet outside the legal set
    InvalidBet,
    /// Trick is complete and has not been cleared yet
    TrickAwaitingClear,
    /// Fewer players than a game needs
    NotEnoughPlayers,
    /// Room is at capacity
    RoomFull,
    /// Player already confirmed readiness
    AlreadyReady,

    // Resource Not Found
    /// Room code not registered
    RoomNotFound,
    /// Player id not present in the room
    PlayerNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
    /// State machine invariant broken
    InvariantViolation,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::InvalidBet => "INVALID_BET",
            Self::TrickAwaitingClear => "TRICK_AWAITING_CLEAR",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::RoomFull => "ROOM_FULL",
            Self::AlreadyReady => "ALREADY_READY",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InvariantViolation => "INVARIANT_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
