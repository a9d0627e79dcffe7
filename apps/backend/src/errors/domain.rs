//! Domain-level error type used by the rules kernel and the state machine.
//!
//! This error type is transport-agnostic. Hosts decide what a rejected
//! intent means for their viewers; HTTP handlers convert into
//! `crate::error::AppError` through the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Reasons an intent can be rejected by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PhaseMismatch,
    OutOfTurn,
    CardNotInHand,
    InvalidBet,
    TrickAwaitingClear,
    NotEnoughPlayers,
    TooManyPlayers,
    AlreadyReady,
    UnknownPlayer,
    InvalidRound,
    NotEnoughCards,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A user intent that breaks a game rule. Hosts drop these.
    Validation(ValidationKind, String),
    /// The state machine reached a state it should never be in.
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::Invariant(_) => None,
        }
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, DomainError::Invariant(_))
    }
}
