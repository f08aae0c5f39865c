//! Rules engine, scoring, and computer opponent for a two-player Spades
//! variant: 11-card deals, one face-down discard per player, ten tricks,
//! parity-based discard bonuses, bags, blind bidding, and two special
//! bag-reducing cards.
//!
//! The crate is transport-agnostic. An external layer (HTTP, CLI, tests)
//! invokes one [`GameEngine`] action at a time; the engine validates it,
//! applies it, and runs any pending computer response synchronously before
//! returning, so the caller always observes a settled state.

pub mod ai;
pub mod domain;
pub mod engine;
pub mod errors;

pub use engine::GameEngine;
pub use errors::GameError;
