use crate::domain::cards_types::{Rank, Suit};
use crate::domain::scoring::{
    apply_bag_thresholds, score_discard_pile, settle_bid, settle_hand,
};
use crate::domain::state::{Parity, Seat, Winner};
use crate::domain::test_state_helpers::{c, make_settlement_session};

#[test]
fn nil_success_pays_flat_hundred() {
    let outcome = settle_bid(0, false, 0);
    assert!(outcome.made);
    assert_eq!(outcome.points, 100);
    assert_eq!(outcome.bags, 0);
}

#[test]
fn nil_failure_costs_hundred_and_converts_tricks_to_bags() {
    let outcome = settle_bid(0, false, 3);
    assert!(!outcome.made);
    assert_eq!(outcome.points, -100);
    assert_eq!(outcome.bags, 3);
}

#[test]
fn made_bid_pays_ten_per_bid_with_overtricks_as_bags() {
    let outcome = settle_bid(4, false, 6);
    assert!(outcome.made);
    assert_eq!(outcome.points, 40);
    assert_eq!(outcome.bags, 2);
}

#[test]
fn missed_bid_costs_ten_per_bid_without_bags() {
    let outcome = settle_bid(6, false, 4);
    assert!(!outcome.made);
    assert_eq!(outcome.points, -60);
    assert_eq!(outcome.bags, 0);
}

#[test]
fn bag_penalty_consumes_seven_per_crossing() {
    let mut bags = 7;
    assert_eq!(apply_bag_thresholds(&mut bags), -100);
    assert_eq!(bags, 0);

    let mut bags = 15;
    assert_eq!(apply_bag_thresholds(&mut bags), -200);
    assert_eq!(bags, 1);
}

#[test]
fn bag_bonus_restores_five_per_crossing() {
    let mut bags = -5;
    assert_eq!(apply_bag_thresholds(&mut bags), 100);
    assert_eq!(bags, 0);

    let mut bags = -12;
    assert_eq!(apply_bag_thresholds(&mut bags), 200);
    assert_eq!(bags, -2);
}

#[test]
fn bags_inside_thresholds_are_untouched() {
    for start in -4..=6 {
        let mut bags = start;
        assert_eq!(apply_bag_thresholds(&mut bags), 0);
        assert_eq!(bags, start);
    }
}

#[test]
fn even_sum_pays_even_seat_base_ten() {
    // 3 + 5 = 8, different suit and rank.
    let s = score_discard_pile(c(Rank::Three, Suit::Hearts), c(Rank::Five, Suit::Clubs));
    assert_eq!(s.sum, 8);
    assert_eq!(s.parity, Parity::Even);
    assert_eq!(s.winner, Seat::Player);
    assert_eq!(s.bonus, 10);
    assert!(!s.paired);
}

#[test]
fn odd_sum_pays_odd_seat() {
    let s = score_discard_pile(c(Rank::Three, Suit::Hearts), c(Rank::Four, Suit::Clubs));
    assert_eq!(s.parity, Parity::Odd);
    assert_eq!(s.winner, Seat::Computer);
}

#[test]
fn shared_suit_or_rank_doubles_the_bonus() {
    let same_suit = score_discard_pile(c(Rank::Three, Suit::Hearts), c(Rank::Five, Suit::Hearts));
    assert_eq!(same_suit.bonus, 20);

    let same_rank = score_discard_pile(c(Rank::Six, Suit::Hearts), c(Rank::Six, Suit::Clubs));
    assert_eq!(same_rank.bonus, 20);
}

#[test]
fn ace_counts_one_in_the_pile() {
    // A + 3 = 4, even.
    let s = score_discard_pile(c(Rank::Ace, Suit::Spades), c(Rank::Three, Suit::Clubs));
    assert_eq!(s.sum, 4);
    assert_eq!(s.parity, Parity::Even);
}

#[test]
fn settle_hand_applies_bids_and_discard_bonus() {
    let mut session = make_settlement_session();
    // Player bid 5 took 6, computer bid 5 took 4. Pile is 3H + 5C, sum 8.
    session.tricks_won[Seat::Player] = 6;
    session.tricks_won[Seat::Computer] = 4;

    let result = settle_hand(&mut session).unwrap();

    // +50 bid, +10 even-parity bonus, one bag kept.
    assert_eq!(session.scores[Seat::Player], 60);
    assert_eq!(session.bags[Seat::Player], 1);
    // -50 missed bid, no bags.
    assert_eq!(session.scores[Seat::Computer], -50);
    assert_eq!(session.bags[Seat::Computer], 0);

    assert!(session.hand_over);
    assert_eq!(session.turn, None);
    assert!(!session.game_over);
    assert_eq!(result.seats.player.score_delta, 60);
    assert_eq!(result.seats.computer.score_delta, -50);
    assert_eq!(result.seats.player.bags_after, 1);
    assert_eq!(result.seats.computer.bags_after, 0);
}

#[test]
fn settlement_record_carries_full_trick_history() {
    let mut session = make_settlement_session();
    let result = settle_hand(&mut session).unwrap();
    assert_eq!(result.tricks, session.trick_history);
    assert_eq!(session.hand_results.as_ref(), Some(&result));
}

#[test]
fn blind_bid_doubles_bid_points_and_discard_bonus() {
    let mut session = make_settlement_session();
    session.bids[Seat::Player] = None;
    session.blind_bid = Some(6);
    session.tricks_won[Seat::Player] = 6;
    session.tricks_won[Seat::Computer] = 4;

    settle_hand(&mut session).unwrap();

    // (2 * 60) bid + (2 * 10) even bonus.
    assert_eq!(session.scores[Seat::Player], 140);
}

#[test]
fn blind_doubling_never_touches_threshold_points() {
    let mut session = make_settlement_session();
    session.bids[Seat::Player] = None;
    session.blind_bid = Some(5);
    session.bags[Seat::Player] = 5;
    session.tricks_won[Seat::Player] = 8; // 3 overtricks push bags to 8
    session.tricks_won[Seat::Computer] = 2;

    settle_hand(&mut session).unwrap();

    // 2*50 bid + 2*10 bonus - 100 threshold (undoubled).
    assert_eq!(session.scores[Seat::Player], 20);
    assert_eq!(session.bags[Seat::Player], 1);
}

#[test]
fn special_card_in_pile_reduces_winner_bags() {
    let mut session = make_settlement_session();
    // 7D + 3H: sum 10, even, pile goes to the player along with the 7D.
    session.discards[Seat::Player] = Some(c(Rank::Seven, Suit::Diamonds));
    session.discards[Seat::Computer] = Some(c(Rank::Three, Suit::Hearts));
    session.tricks_won[Seat::Player] = 6;
    session.tricks_won[Seat::Computer] = 4;

    settle_hand(&mut session).unwrap();

    // 1 overtrick bag minus the 7D's 2 -> -1.
    assert_eq!(session.bags[Seat::Player], -1);
}

#[test]
fn trick_special_pulls_fold_in_before_thresholds() {
    let mut session = make_settlement_session();
    session.bags[Seat::Computer] = -3;
    session.special_pulls[Seat::Computer] = 2;
    session.tricks_won[Seat::Player] = 5;
    session.tricks_won[Seat::Computer] = 5;

    settle_hand(&mut session).unwrap();

    // -3 carried, no new bags, -2 specials -> -5 crosses the bonus line.
    assert_eq!(session.bags[Seat::Computer], 0);
    assert_eq!(session.scores[Seat::Computer], 150); // +50 bid + 100 bonus
}

#[test]
fn reaching_target_ends_the_game() {
    let mut session = make_settlement_session();
    session.scores[Seat::Player] = 260;
    session.tricks_won[Seat::Player] = 6;
    session.tricks_won[Seat::Computer] = 4;

    settle_hand(&mut session).unwrap();

    assert!(session.game_over);
    assert_eq!(session.winner, Some(Winner::Player));
}

#[test]
fn mercy_gap_ends_the_game_below_target() {
    let mut session = make_settlement_session();
    session.scores[Seat::Player] = 100;
    session.scores[Seat::Computer] = -210;
    session.tricks_won[Seat::Player] = 6;
    session.tricks_won[Seat::Computer] = 4;

    settle_hand(&mut session).unwrap();

    // 160 vs -260 is a 420-point gap.
    assert!(session.game_over);
    assert_eq!(session.winner, Some(Winner::Player));
    assert!(session.scores[Seat::Player] < 300);
}
