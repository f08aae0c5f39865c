//! Trick play: legality enforcement, two-card resolution, table clearing.

use crate::domain::cards_logic::{follower_wins, special_bag_reduction};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::{is_legal_play, TRICKS_PER_HAND};
use crate::domain::state::{require_phase, require_turn, GameSession, Phase, Seat, TrickPlay, TrickRecord};
use crate::errors::GameError;

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether this play completed the trick (second card).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Whether this was the last trick of the hand. Settlement is the
    /// caller's next step.
    pub hand_finished: bool,
}

/// Play a card into the current trick, enforcing phase, turn, and legality.
///
/// A completed trick stays on the table (`trick_completed`) until
/// [`clear_trick`] is called; the winner is credited immediately.
pub fn play_card(
    session: &mut GameSession,
    seat: Seat,
    card: Card,
) -> Result<PlayOutcome, GameError> {
    require_phase(session, Phase::Playing, "play_card")?;
    if session.hand_over {
        return Err(GameError::invalid_phase(
            "hand is settled, start the next hand",
        ));
    }
    if session.trick_completed {
        return Err(GameError::invalid_phase(
            "previous trick must be cleared first",
        ));
    }
    require_turn(session, seat)?;

    let hand = session.hand_of(seat);
    let Some(pos) = hand.iter().position(|&c| c == card) else {
        return Err(GameError::invalid_input(format!(
            "card {} not in hand",
            card.label()
        )));
    };
    let lead = session.trick_lead();
    if !is_legal_play(hand, card, lead, session.spades_broken) {
        let detail = match lead {
            Some(led) => format!("must follow {:?}", led.suit),
            None => "spades are not broken".to_string(),
        };
        return Err(GameError::illegal_move(detail));
    }

    session.hand_of_mut(seat).remove(pos);
    session.current_trick.push(TrickPlay { seat, card });
    if card.suit == Suit::Spades {
        session.spades_broken = true;
    }

    if session.current_trick.len() < 2 {
        session.turn = Some(seat.opponent());
        return Ok(PlayOutcome {
            trick_completed: false,
            trick_winner: None,
            hand_finished: false,
        });
    }

    let winner = resolve_current_trick(session)?;
    session.tricks_won[winner] += 1;
    for play in &session.current_trick {
        session.special_pulls[winner] += special_bag_reduction(play.card);
    }
    session.trick_history.push(TrickRecord {
        trick_number: session.trick_number,
        plays: session.current_trick.clone(),
        winner,
    });
    session.trick_completed = true;
    session.last_trick_winner = Some(winner);
    session.turn = None;

    Ok(PlayOutcome {
        trick_completed: true,
        trick_winner: Some(winner),
        hand_finished: session.trick_number == TRICKS_PER_HAND,
    })
}

/// Winner of the two cards on the table.
fn resolve_current_trick(session: &GameSession) -> Result<Seat, GameError> {
    let [lead, follow] = session.current_trick.as_slice() else {
        return Err(GameError::invalid_phase("trick is not complete"));
    };
    if follower_wins(lead.card, follow.card) {
        Ok(follow.seat)
    } else {
        Ok(lead.seat)
    }
}

/// Clear a resolved trick from the table. Returns the next leader, or None
/// when the hand has no tricks left.
pub fn clear_trick(session: &mut GameSession) -> Result<Option<Seat>, GameError> {
    // The final trick of a game may be cleared after the phase has moved on.
    if !matches!(session.phase, Phase::Playing | Phase::GameOver) {
        return Err(GameError::invalid_phase(format!(
            "clear_trick requires Playing, session is in {:?}",
            session.phase
        )));
    }
    if !session.trick_completed {
        return Err(GameError::invalid_phase("no resolved trick to clear"));
    }
    let winner = session.last_trick_winner.ok_or_else(|| {
        GameError::invalid_phase("resolved trick has no recorded winner")
    })?;

    session.current_trick.clear();
    session.trick_completed = false;

    if session.hand_over
        || session.phase == Phase::GameOver
        || session.trick_number >= TRICKS_PER_HAND
    {
        session.turn = None;
        return Ok(None);
    }
    session.trick_number += 1;
    session.turn = Some(winner);
    Ok(Some(winner))
}
