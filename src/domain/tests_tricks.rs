use crate::domain::cards_types::{Rank, Suit};
use crate::domain::rules::TRICKS_PER_HAND;
use crate::domain::state::Seat;
use crate::domain::test_state_helpers::{c, make_playing_session};
use crate::domain::tricks::{clear_trick, play_card};
use crate::errors::GameError;

#[test]
fn must_follow_suit_is_rejected_and_state_unchanged() {
    let mut session = make_playing_session(
        vec![c(Rank::Four, Suit::Hearts), c(Rank::King, Suit::Clubs)],
        vec![c(Rank::Ten, Suit::Hearts), c(Rank::Two, Suit::Diamonds)],
        Seat::Computer,
    );
    play_card(&mut session, Seat::Computer, c(Rank::Ten, Suit::Hearts)).unwrap();

    let before = session.clone();
    let err = play_card(&mut session, Seat::Player, c(Rank::King, Suit::Clubs)).unwrap_err();
    assert!(matches!(err, GameError::IllegalMove(_)));
    assert_eq!(session.player_hand, before.player_hand);
    assert_eq!(session.current_trick, before.current_trick);
    assert_eq!(session.turn, before.turn);
}

#[test]
fn out_of_turn_play_is_rejected() {
    let mut session = make_playing_session(
        vec![c(Rank::Four, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts)],
        Seat::Computer,
    );
    let err = play_card(&mut session, Seat::Player, c(Rank::Four, Suit::Hearts)).unwrap_err();
    assert_eq!(err, GameError::NotYourTurn);
}

#[test]
fn card_not_in_hand_is_invalid_input() {
    let mut session = make_playing_session(
        vec![c(Rank::Four, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts)],
        Seat::Player,
    );
    let err = play_card(&mut session, Seat::Player, c(Rank::Five, Suit::Hearts)).unwrap_err();
    assert!(matches!(err, GameError::InvalidInput(_)));
}

#[test]
fn cannot_lead_spade_until_broken() {
    let mut session = make_playing_session(
        vec![c(Rank::Ace, Suit::Spades), c(Rank::Two, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts)],
        Seat::Player,
    );
    let err = play_card(&mut session, Seat::Player, c(Rank::Ace, Suit::Spades)).unwrap_err();
    assert!(matches!(err, GameError::IllegalMove(_)));
    assert!(!session.spades_broken);
}

#[test]
fn spade_follow_breaks_spades_and_trumps() {
    let mut session = make_playing_session(
        vec![c(Rank::Ace, Suit::Hearts)],
        vec![c(Rank::Two, Suit::Spades), c(Rank::Nine, Suit::Clubs)],
        Seat::Player,
    );
    play_card(&mut session, Seat::Player, c(Rank::Ace, Suit::Hearts)).unwrap();
    let outcome = play_card(&mut session, Seat::Computer, c(Rank::Two, Suit::Spades)).unwrap();

    assert!(session.spades_broken);
    assert!(outcome.trick_completed);
    assert_eq!(outcome.trick_winner, Some(Seat::Computer));
    assert_eq!(session.tricks_won[Seat::Computer], 1);
    assert_eq!(session.turn, None);
    assert!(session.trick_completed);
}

#[test]
fn lead_suit_high_card_wins_without_spades() {
    let mut session = make_playing_session(
        vec![c(Rank::King, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Clubs)],
        Seat::Player,
    );
    play_card(&mut session, Seat::Player, c(Rank::King, Suit::Hearts)).unwrap();
    let outcome = play_card(&mut session, Seat::Computer, c(Rank::Ten, Suit::Hearts)).unwrap();
    assert_eq!(outcome.trick_winner, Some(Seat::Player));
    assert_eq!(session.trick_history.len(), 1);
    assert_eq!(session.trick_history[0].winner, Seat::Player);
}

#[test]
fn play_blocked_while_trick_awaits_clear() {
    let mut session = make_playing_session(
        vec![c(Rank::King, Suit::Hearts), c(Rank::Two, Suit::Clubs)],
        vec![c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Clubs)],
        Seat::Player,
    );
    play_card(&mut session, Seat::Player, c(Rank::King, Suit::Hearts)).unwrap();
    play_card(&mut session, Seat::Computer, c(Rank::Ten, Suit::Hearts)).unwrap();

    let err = play_card(&mut session, Seat::Player, c(Rank::Two, Suit::Clubs)).unwrap_err();
    assert!(matches!(err, GameError::InvalidPhase(_)));
}

#[test]
fn clear_trick_hands_lead_to_winner() {
    let mut session = make_playing_session(
        vec![c(Rank::King, Suit::Hearts), c(Rank::Two, Suit::Clubs)],
        vec![c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Clubs)],
        Seat::Player,
    );
    play_card(&mut session, Seat::Player, c(Rank::King, Suit::Hearts)).unwrap();
    play_card(&mut session, Seat::Computer, c(Rank::Ten, Suit::Hearts)).unwrap();

    let next = clear_trick(&mut session).unwrap();
    assert_eq!(next, Some(Seat::Player));
    assert_eq!(session.trick_number, 2);
    assert!(session.current_trick.is_empty());
    assert!(!session.trick_completed);
    assert_eq!(session.turn, Some(Seat::Player));
}

#[test]
fn clear_trick_without_resolved_trick_is_rejected() {
    let mut session = make_playing_session(
        vec![c(Rank::King, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts)],
        Seat::Player,
    );
    assert!(matches!(
        clear_trick(&mut session),
        Err(GameError::InvalidPhase(_))
    ));
}

#[test]
fn special_cards_in_trick_credit_the_winner() {
    let mut session = make_playing_session(
        vec![c(Rank::Ace, Suit::Diamonds)],
        vec![c(Rank::Seven, Suit::Diamonds), c(Rank::Nine, Suit::Clubs)],
        Seat::Player,
    );
    play_card(&mut session, Seat::Player, c(Rank::Ace, Suit::Diamonds)).unwrap();
    play_card(&mut session, Seat::Computer, c(Rank::Seven, Suit::Diamonds)).unwrap();

    assert_eq!(session.special_pulls[Seat::Player], 2);
    assert_eq!(session.special_pulls[Seat::Computer], 0);
}

#[test]
fn tenth_trick_reports_hand_finished() {
    let mut session = make_playing_session(
        vec![c(Rank::King, Suit::Hearts)],
        vec![c(Rank::Ten, Suit::Hearts)],
        Seat::Player,
    );
    session.trick_number = TRICKS_PER_HAND;
    play_card(&mut session, Seat::Player, c(Rank::King, Suit::Hearts)).unwrap();
    let outcome = play_card(&mut session, Seat::Computer, c(Rank::Ten, Suit::Hearts)).unwrap();
    assert!(outcome.hand_finished);
}
