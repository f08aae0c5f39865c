//! End-of-hand settlement: bid outcomes, bags, parity bonus, special cards,
//! blind doubling, and game-end detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards_logic::special_bag_reduction;
use crate::domain::cards_types::Card;
use crate::domain::rules::{
    BAG_ADJUSTMENT, BAG_BONUS_THRESHOLD, BAG_PENALTY_THRESHOLD, MERCY_GAP, NIL_VALUE, TARGET_SCORE,
};
use crate::domain::state::{BySeat, GameSession, Parity, Phase, Seat, TrickRecord, Winner};
use crate::errors::GameError;

/// Parity scoring of the two face-down discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardSettlement {
    pub player_card: Card,
    pub computer_card: Card,
    /// Sum of the two discard values (Ace counts 1).
    pub sum: u32,
    pub parity: Parity,
    /// Seat whose parity matches the sum; receives the bonus and owns any
    /// special card in the pile.
    pub winner: Seat,
    /// Base bonus before blind doubling: 10, or 20 on a shared suit or rank.
    pub bonus: i32,
    pub paired: bool,
}

/// Settlement of one seat's bid against the tricks it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidOutcome {
    pub bid: u8,
    pub blind: bool,
    pub tricks_taken: u8,
    pub made: bool,
    /// Bid points before blind doubling.
    pub points: i32,
    /// Raw bag delta from this bid (overtricks, or all tricks on failed Nil).
    pub bags: i32,
}

/// One seat's full scoring breakdown for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSettlement {
    pub seat: Seat,
    pub bid: BidOutcome,
    /// Bag reductions from special cards captured in tricks or the pile.
    pub special_reduction: i32,
    /// Points from bag-threshold crossings (multiples of ±100).
    pub threshold_points: i32,
    /// Discard-pile bonus credited to this seat, after blind doubling.
    pub discard_bonus: i32,
    /// Total change to the persistent score this hand.
    pub score_delta: i32,
    pub bags_after: i32,
}

/// Complete record of a settled hand. Structured so the presentation layer
/// can explain the scoring without recomputing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u32,
    pub discard: DiscardSettlement,
    pub seats: BySeat<SeatSettlement>,
    pub tricks: Vec<TrickRecord>,
    pub scores_after: BySeat<i32>,
    pub bags_after: BySeat<i32>,
}

/// Settle one seat's bid. A Nil (bid 0) pays a flat ±100; a positive bid
/// pays ±10 per trick bid, with overtricks becoming bags on success and a
/// failed Nil converting every trick taken into a bag.
pub fn settle_bid(bid: u8, blind: bool, tricks_taken: u8) -> BidOutcome {
    if bid == 0 {
        let made = tricks_taken == 0;
        return BidOutcome {
            bid,
            blind,
            tricks_taken,
            made,
            points: if made { NIL_VALUE } else { -NIL_VALUE },
            bags: if made { 0 } else { tricks_taken as i32 },
        };
    }
    let made = tricks_taken >= bid;
    BidOutcome {
        bid,
        blind,
        tricks_taken,
        made,
        points: if made { 10 * bid as i32 } else { -10 * bid as i32 },
        bags: if made { tricks_taken as i32 - bid as i32 } else { 0 },
    }
}

/// Score the discard pile: even sum pays the even-parity seat, odd sum the
/// odd-parity seat; a shared suit or shared rank doubles the base bonus.
pub fn score_discard_pile(player_card: Card, computer_card: Card) -> DiscardSettlement {
    let sum = player_card.rank.discard_value() as u32 + computer_card.rank.discard_value() as u32;
    let parity = if sum % 2 == 0 { Parity::Even } else { Parity::Odd };
    let winner = if Seat::Player.parity() == parity {
        Seat::Player
    } else {
        Seat::Computer
    };
    let paired =
        player_card.suit == computer_card.suit || player_card.rank == computer_card.rank;
    DiscardSettlement {
        player_card,
        computer_card,
        sum,
        parity,
        winner,
        bonus: if paired { 20 } else { 10 },
        paired,
    }
}

/// Resolve bag-threshold crossings against a persistent bag counter.
/// Each crossing of +7 costs 100 points and consumes 7 bags; each crossing
/// of -5 pays 100 points and restores 5. Crossings compound.
pub fn apply_bag_thresholds(bags: &mut i32) -> i32 {
    let mut points = 0;
    while *bags >= BAG_PENALTY_THRESHOLD {
        points -= BAG_ADJUSTMENT;
        *bags -= BAG_PENALTY_THRESHOLD;
    }
    while *bags <= BAG_BONUS_THRESHOLD {
        points += BAG_ADJUSTMENT;
        *bags -= BAG_BONUS_THRESHOLD;
    }
    points
}

/// Run the full settlement for a finished hand and apply it to the session.
///
/// Order: bid settlement, raw bags, special-card reductions, threshold
/// crossings, discard-pile bonus, then the win/mercy check. Blind doubling
/// applies to bid points and the discard bonus, never to threshold points.
pub fn settle_hand(session: &mut GameSession) -> Result<HandResult, GameError> {
    let (Some(player_discard), Some(computer_discard)) =
        (session.discards[Seat::Player], session.discards[Seat::Computer])
    else {
        return Err(GameError::invalid_phase("settlement requires both discards"));
    };
    let discard = score_discard_pile(player_discard, computer_discard);

    // Specials in the pile belong to the parity winner.
    let pile_reduction = special_bag_reduction(player_discard)
        + special_bag_reduction(computer_discard);
    session.special_pulls[discard.winner] += pile_reduction;

    let seats = BySeat {
        player: settle_seat(session, Seat::Player, &discard)?,
        computer: settle_seat(session, Seat::Computer, &discard)?,
    };

    let result = HandResult {
        hand_number: session.hand_number,
        discard,
        seats,
        tricks: session.trick_history.clone(),
        scores_after: session.scores,
        bags_after: session.bags,
    };

    session.hand_over = true;
    session.turn = None;
    session.hand_results = Some(result.clone());

    check_game_end(session);

    debug!(
        hand = session.hand_number,
        player_score = session.scores[Seat::Player],
        computer_score = session.scores[Seat::Computer],
        game_over = session.game_over,
        "hand settled"
    );

    Ok(result)
}

fn settle_seat(
    session: &mut GameSession,
    seat: Seat,
    discard: &DiscardSettlement,
) -> Result<SeatSettlement, GameError> {
    let Some(bid) = session.effective_bid(seat) else {
        return Err(GameError::invalid_phase("settlement requires both bids"));
    };
    let blind = session.bid_is_blind(seat);
    let outcome = settle_bid(bid, blind, session.tricks_won[seat]);

    let multiplier = if blind { 2 } else { 1 };
    let bid_points = outcome.points * multiplier;

    session.bags[seat] += outcome.bags;
    let special_reduction = session.special_pulls[seat];
    session.bags[seat] -= special_reduction;
    let threshold_points = apply_bag_thresholds(&mut session.bags[seat]);

    let discard_bonus = if discard.winner == seat {
        discard.bonus * multiplier
    } else {
        0
    };

    let score_delta = bid_points + threshold_points + discard_bonus;
    session.scores[seat] += score_delta;

    Ok(SeatSettlement {
        seat,
        bid: outcome,
        special_reduction,
        threshold_points,
        discard_bonus,
        score_delta,
        bags_after: session.bags[seat],
    })
}

/// Game ends when a seat reaches the target score or leads by the mercy
/// gap; the higher score wins, equal scores tie.
fn check_game_end(session: &mut GameSession) {
    let player = session.scores[Seat::Player];
    let computer = session.scores[Seat::Computer];
    let reached = player >= TARGET_SCORE || computer >= TARGET_SCORE;
    let mercy = (player - computer).abs() >= MERCY_GAP;
    if !reached && !mercy {
        return;
    }
    session.game_over = true;
    session.phase = Phase::GameOver;
    session.turn = None;
    session.winner = Some(match player.cmp(&computer) {
        std::cmp::Ordering::Greater => Winner::Player,
        std::cmp::Ordering::Less => Winner::Computer,
        std::cmp::Ordering::Equal => Winner::Tie,
    });
}
