//! Random policy - makes random legal moves.
//!
//! [`RandomPolicy`] is the reference implementation of
//! [`OpponentPolicy`](super::OpponentPolicy): it declines blind bids, bids
//! and plays uniformly at random among legal options, and is seedable for
//! deterministic tests.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{BidContext, BlindContext, DiscardContext, OpponentPolicy, PlayContext, PolicyError};
use crate::domain::cards_types::Card;
use crate::domain::rules::valid_bid_range;

/// Policy that makes random legal moves.
///
/// Mutable RNG state sits behind a `Mutex` because the trait methods take
/// `&self`.
pub struct RandomPolicy {
    rng: Mutex<StdRng>,
}

impl RandomPolicy {
    pub const NAME: &'static str = "random";

    /// `Some(seed)` gives reproducible behavior; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, PolicyError> {
        self.rng
            .lock()
            .map_err(|e| PolicyError::Internal(format!("RNG lock poisoned: {e}")))
    }
}

impl OpponentPolicy for RandomPolicy {
    fn choose_blind(&self, _ctx: &BlindContext) -> Result<Option<u8>, PolicyError> {
        Ok(None)
    }

    fn choose_bid(&self, _ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
        let mut rng = self.rng()?;
        Ok(rng.random_range(valid_bid_range()))
    }

    fn choose_discard(&self, ctx: &DiscardContext<'_>) -> Result<usize, PolicyError> {
        if ctx.hand.is_empty() {
            return Err(PolicyError::InvalidMove("no cards to discard".into()));
        }
        let mut rng = self.rng()?;
        Ok(rng.random_range(0..ctx.hand.len()))
    }

    fn choose_play(&self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
        if ctx.legal.is_empty() {
            return Err(PolicyError::InvalidMove("no legal plays available".into()));
        }
        let mut rng = self.rng()?;
        ctx.legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| PolicyError::Internal("failed to choose random card".into()))
    }
}
