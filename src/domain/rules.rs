//! Game constants and pure rule predicates: bid ranges, blind eligibility,
//! play legality, and hand leadership rotation.

use std::ops::RangeInclusive;

use super::cards_logic::{all_spades, hand_has_suit};
use super::cards_types::{Card, Suit};
use super::state::Seat;

/// Cards dealt to each player before the discard.
pub const HAND_SIZE: usize = 11;
/// Tricks played per hand once each player has discarded one card.
pub const TRICKS_PER_HAND: usize = 10;

pub const TARGET_SCORE: i32 = 300;
/// A game also ends early when the score gap reaches this margin.
pub const MERCY_GAP: i32 = 300;

/// Minimum deficit to be offered blind bidding.
pub const BLIND_DEFICIT: i32 = 100;

pub const BAG_PENALTY_THRESHOLD: i32 = 7;
pub const BAG_BONUS_THRESHOLD: i32 = -5;
pub const BAG_ADJUSTMENT: i32 = 100;

pub const NIL_VALUE: i32 = 100;

pub fn valid_bid_range() -> RangeInclusive<u8> {
    0..=TRICKS_PER_HAND as u8
}

pub fn valid_blind_bid_range() -> RangeInclusive<u8> {
    5..=TRICKS_PER_HAND as u8
}

/// How far `seat_score` trails `opponent_score`. Negative when ahead.
pub fn deficit(seat_score: i32, opponent_score: i32) -> i32 {
    opponent_score - seat_score
}

/// Blind bidding is offered only to a seat trailing by at least
/// [`BLIND_DEFICIT`] points at the start of a hand.
pub fn blind_eligible(seat_score: i32, opponent_score: i32) -> bool {
    deficit(seat_score, opponent_score) >= BLIND_DEFICIT
}

/// Whether `card` may be played from `hand` onto a trick.
///
/// `lead` is the card already on the table, or `None` when this play leads.
/// Leading a spade requires spades to be broken unless the hand is all
/// spades; following requires matching the lead suit when possible.
pub fn is_legal_play(hand: &[Card], card: Card, lead: Option<Card>, spades_broken: bool) -> bool {
    if !hand.contains(&card) {
        return false;
    }
    match lead {
        None => {
            card.suit != Suit::Spades || spades_broken || all_spades(hand)
        }
        Some(led) => card.suit == led.suit || !hand_has_suit(hand, led.suit),
    }
}

pub fn legal_plays(hand: &[Card], lead: Option<Card>, spades_broken: bool) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&c| is_legal_play(hand, c, lead, spades_broken))
        .collect()
}

/// Who leads the first trick of a hand. The odd-parity seat leads hand 1,
/// then leadership alternates every hand.
pub fn leader_for_hand(odd_seat: Seat, hand_number: u32) -> Seat {
    if hand_number % 2 == 1 {
        odd_seat
    } else {
        odd_seat.opponent()
    }
}
