//! Opponent policy trait definition.

use std::fmt;

use crate::domain::cards_types::Card;
use crate::domain::state::Parity;

/// Errors that can occur during policy decision-making.
#[derive(Debug)]
pub enum PolicyError {
    /// Policy encountered an internal error
    Internal(String),
    /// Policy produced or faced an invalid move situation
    InvalidMove(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Internal(msg) => write!(f, "policy internal error: {msg}"),
            PolicyError::InvalidMove(msg) => write!(f, "policy invalid move: {msg}"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// What a policy may see before deciding on a blind bid: the hand is not
/// dealt yet, so only the score situation is available.
#[derive(Debug, Clone, Copy)]
pub struct BlindContext {
    /// How far this seat trails the opponent (always >= the eligibility
    /// threshold when this is called).
    pub deficit: i32,
}

/// Context for a normal bid decision.
#[derive(Debug, Clone)]
pub struct BidContext<'a> {
    pub hand: &'a [Card],
    /// Opponent's bid if it is already on the table.
    pub opponent_bid: Option<u8>,
    pub my_score: i32,
    pub opponent_score: i32,
    pub my_bags: i32,
}

/// Context for choosing which card to set aside face down.
#[derive(Debug, Clone)]
pub struct DiscardContext<'a> {
    pub hand: &'a [Card],
    pub my_parity: Parity,
}

/// Context for a card-play decision.
#[derive(Debug, Clone)]
pub struct PlayContext<'a> {
    pub hand: &'a [Card],
    /// Card already on the table, None when leading.
    pub lead: Option<Card>,
    pub spades_broken: bool,
    /// Plays the rules engine will accept; never empty.
    pub legal: &'a [Card],
    pub my_bid: u8,
    pub my_tricks: u8,
    pub my_bags: i32,
}

/// Trait for computer opponents.
///
/// Implementations receive the relevant slice of session state and must
/// choose a legal action; the engine validates every returned action and
/// falls back to a safe default if a policy misbehaves.
pub trait OpponentPolicy: Send + Sync {
    /// Decide whether to bid blind, and for how much. `None` declines.
    fn choose_blind(&self, ctx: &BlindContext) -> Result<Option<u8>, PolicyError>;

    /// Choose a bid in 0..=10; 0 is a Nil attempt.
    fn choose_bid(&self, ctx: &BidContext<'_>) -> Result<u8, PolicyError>;

    /// Choose the index of the hand card to discard.
    fn choose_discard(&self, ctx: &DiscardContext<'_>) -> Result<usize, PolicyError>;

    /// Choose a card from `ctx.legal` to play.
    fn choose_play(&self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError>;
}
