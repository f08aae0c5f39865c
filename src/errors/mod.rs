//! Engine-level error type surfaced to callers for every rejected action.
//!
//! All variants are synchronous, locally detected, and non-fatal: a rejected
//! action leaves the [`GameSession`](crate::domain::GameSession) completely
//! unchanged, so retrying after an error is always safe.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Action attempted outside its valid phase or lifecycle state.
    #[error("invalid phase: {0}")]
    InvalidPhase(String),
    /// Value out of its allowed range (bid, card index).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Card play violates follow-suit or spades-broken rules.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// Play attempted by the seat that is not on turn.
    #[error("not your turn")]
    NotYourTurn,
    /// Duplicate bid or discard within the same hand.
    #[error("already acted: {0}")]
    AlreadyActed(String),
}

impl GameError {
    pub fn invalid_phase(detail: impl Into<String>) -> Self {
        Self::InvalidPhase(detail.into())
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    pub fn illegal_move(detail: impl Into<String>) -> Self {
        Self::IllegalMove(detail.into())
    }

    pub fn already_acted(detail: impl Into<String>) -> Self {
        Self::AlreadyActed(detail.into())
    }
}
