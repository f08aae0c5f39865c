//! Computer opponent module - handles automated game decisions.
//!
//! This module provides:
//! - [`OpponentPolicy`] trait for pluggable opponents
//! - [`MartaPolicy`]: the shipped heuristic opponent
//! - [`RandomPolicy`]: random legal moves (seedable, for tests)
//! - [`PolicyConfig`]: tunable constants shared by implementations

pub mod config;
mod marta;
mod random;
mod trait_def;

pub use config::PolicyConfig;
pub use marta::{analyze_hand_strength, HandStrength, MartaPolicy};
pub use random::RandomPolicy;
use serde_json::Value as JsonValue;
pub use trait_def::{
    BidContext, BlindContext, DiscardContext, OpponentPolicy, PlayContext, PolicyError,
};

/// Create a policy from a name and optional JSON config.
///
/// Currently supports:
/// - "marta": the heuristic opponent
/// - "random": uniform random legal moves
///
/// Returns None if the name is unrecognized.
pub fn create_policy(name: &str, config: Option<&JsonValue>) -> Option<Box<dyn OpponentPolicy>> {
    match name {
        MartaPolicy::NAME => Some(Box::new(MartaPolicy::new(PolicyConfig::from_json(config)))),
        RandomPolicy::NAME => {
            let config = PolicyConfig::from_json(config);
            Some(Box::new(RandomPolicy::new(config.seed())))
        }
        _ => None,
    }
}
