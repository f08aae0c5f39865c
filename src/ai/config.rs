//! Policy configuration handling.
//!
//! Provides a typed interface for tuning the heuristics, extracting
//! standard fields from a JSON config while preserving policy-specific
//! custom fields.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Tunable constants for computer policies.
///
/// Example JSON config:
/// ```json
/// {"seed": 12345, "max_bid": 7, "nil_threshold": 1.0}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Optional RNG seed for deterministic tie-breaking, useful for tests
    /// and replaying scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Cap on the bid the heuristic will place regardless of estimated
    /// strength.
    #[serde(default = "default_max_bid")]
    pub max_bid: u8,

    /// Nil is only attempted when the estimated trick expectation is at or
    /// below this value.
    #[serde(default = "default_nil_threshold")]
    pub nil_threshold: f64,

    /// Minimum deficit before a blind bid is even considered.
    #[serde(default = "default_blind_deficit")]
    pub blind_deficit: i32,

    /// Bag count at which the policy starts ducking winnable tricks once
    /// its bid is met.
    #[serde(default = "default_bag_caution")]
    pub bag_caution: i32,

    /// Policy-specific fields not covered by the standard schema.
    #[serde(flatten)]
    pub custom: JsonValue,
}

fn default_max_bid() -> u8 {
    8
}

fn default_nil_threshold() -> f64 {
    1.2
}

fn default_blind_deficit() -> i32 {
    120
}

fn default_bag_caution() -> i32 {
    5
}

impl PolicyConfig {
    /// Create a PolicyConfig from an optional JSON value, falling back to
    /// defaults on missing or malformed input.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_default(),
            None => Self::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Get a custom configuration field by key.
    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_bid: default_max_bid(),
            nil_threshold: default_nil_threshold(),
            blind_deficit: default_blind_deficit(),
            bag_caution: default_bag_caution(),
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }
}
