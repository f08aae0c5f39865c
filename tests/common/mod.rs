#![allow(dead_code)]

// Shared helpers for the integration test binaries.

use std::sync::Once;

use two_spades::domain::rules::legal_plays;
use two_spades::domain::{Seat, GameSession};
use two_spades::GameEngine;

static INIT: Once = Once::new();

/// Install a tracing subscriber once per test binary; RUST_LOG controls
/// verbosity.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Index in the player's hand of some currently legal card.
pub fn first_legal_index(session: &GameSession) -> usize {
    let legal = legal_plays(
        &session.player_hand,
        session.trick_lead(),
        session.spades_broken,
    );
    let card = legal[0];
    session
        .player_hand
        .iter()
        .position(|&c| c == card)
        .expect("legal card comes from the hand")
}

/// Drive the player side of a hand to completion, always playing the first
/// legal card and clearing resolved tricks.
pub fn play_out_hand(engine: &mut GameEngine) {
    let mut guard = 0;
    while !engine.session().hand_over {
        guard += 1;
        assert!(guard < 100, "hand did not terminate");

        if engine.session().trick_completed {
            engine.clear_trick().expect("clearing a resolved trick");
            continue;
        }
        assert_eq!(
            engine.session().turn,
            Some(Seat::Player),
            "engine must settle computer actions before returning"
        );
        let idx = first_legal_index(engine.session());
        engine.play(idx).expect("first legal card is playable");
    }
}

/// Every card of the 22 dealt this hand is in exactly one place.
pub fn assert_card_conservation(session: &GameSession) {
    use std::collections::HashSet;
    use two_spades::domain::Card;

    let mut seen: HashSet<Card> = HashSet::new();
    let mut count = 0usize;
    let mut track = |card: Card| {
        assert!(seen.insert(card), "card {} appears twice", card.label());
        count += 1;
    };

    for &card in session.player_hand.iter().chain(&session.computer_hand) {
        track(card);
    }
    for seat in [Seat::Player, Seat::Computer] {
        if let Some(card) = session.discards[seat] {
            track(card);
        }
    }
    for record in &session.trick_history {
        for play in &record.plays {
            track(play.card);
        }
    }
    // The trick in progress is not yet in the history.
    if !session.trick_completed {
        for play in &session.current_trick {
            track(play.card);
        }
    }
    assert_eq!(count, 22, "dealt cards must all be accounted for");
}
