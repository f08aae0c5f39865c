// Proptest generators for domain types. Cards are generated unique by
// construction (sampled deck indices) rather than by filtering.

use proptest::prelude::*;
use proptest::sample;

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::dealing::full_deck;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    sample::select(Rank::ALL.as_slice())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Between 1 and `max` distinct cards.
pub fn unique_cards_up_to(max: usize) -> impl Strategy<Value = Vec<Card>> {
    sample::subsequence(full_deck(), 1..=max)
}
