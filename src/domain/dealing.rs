//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::rules::HAND_SIZE;

/// Two 11-card hands plus the 30 undealt cards, in post-shuffle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub player_hand: Vec<Card>,
    pub computer_hand: Vec<Card>,
    pub undealt: Vec<Card>,
}

/// Generate a full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Deal both hands deterministically from an RNG seed.
///
/// Hands are sorted for display; the undealt remainder never enters play.
pub fn deal_hands(seed: u64) -> Deal {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deal_hands_with(&mut rng)
}

/// Deal both hands from a caller-supplied RNG.
pub fn deal_hands_with<R: rand::Rng + ?Sized>(rng: &mut R) -> Deal {
    let mut deck = full_deck();
    deck.shuffle(rng);

    let mut player_hand = deck[..HAND_SIZE].to_vec();
    let mut computer_hand = deck[HAND_SIZE..2 * HAND_SIZE].to_vec();
    player_hand.sort();
    computer_hand.sort();

    Deal {
        player_hand,
        computer_hand,
        undealt: deck[2 * HAND_SIZE..].to_vec(),
    }
}
