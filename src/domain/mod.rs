//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod rules;
pub mod scoring;
pub mod session_serde;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_logic::{follower_wins, hand_has_suit, special_bag_reduction};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{deal_hands, Deal};
pub use rules::{is_legal_play, legal_plays};
pub use scoring::HandResult;
pub use snapshot::StateView;
pub use state::{GameSession, Parity, Phase, Seat, Winner};
