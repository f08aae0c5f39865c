//! Card game logic: suit queries, two-card trick comparison, special cards.

use super::cards_types::{Card, Rank, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn all_spades(hand: &[Card]) -> bool {
    hand.iter().all(|c| c.suit == Suit::Spades)
}

/// Whether the following card beats the led card in a two-player trick.
///
/// Spades always trump; otherwise only a higher card of the lead suit wins.
/// An off-suit non-spade follow can never win.
pub fn follower_wins(lead: Card, follow: Card) -> bool {
    if follow.suit == lead.suit {
        follow.rank > lead.rank
    } else {
        follow.suit == Suit::Spades
    }
}

/// Bag reduction granted by a special card (7♦ removes 2 bags, 10♣ removes 1),
/// credited to whoever wins the trick or discard pile containing it.
pub fn special_bag_reduction(card: Card) -> i32 {
    match (card.rank, card.suit) {
        (Rank::Seven, Suit::Diamonds) => 2,
        (Rank::Ten, Suit::Clubs) => 1,
        _ => 0,
    }
}

pub fn is_special_card(card: Card) -> bool {
    special_bag_reduction(card) > 0
}
