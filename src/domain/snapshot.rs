//! Caller-facing snapshot of a session, with the computer's hand hidden
//! unless the debug toggle is on.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::rules::{legal_plays, TARGET_SCORE};
use crate::domain::scoring::HandResult;
use crate::domain::state::{GameSession, Parity, Phase, Seat, TrickPlay, TrickRecord, Winner};

pub const PLAYER_NAME: &str = "Tom";
pub const COMPUTER_NAME: &str = "Marta";

/// Flat serialized view of a [`GameSession`]. Field names are part of the
/// contract with the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateView {
    pub phase: Phase,
    pub hand_number: u32,
    pub player_name: String,
    pub computer_name: String,
    pub player_parity: Parity,
    pub computer_parity: Parity,
    pub player_hand: Vec<Card>,
    /// Present only when debug visibility is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_hand: Option<Vec<Card>>,
    pub computer_hand_count: usize,
    pub player_discarded: bool,
    pub computer_discarded: bool,
    pub player_bid: Option<u8>,
    pub computer_bid: Option<u8>,
    pub blind_bid: Option<u8>,
    pub computer_blind_bid: Option<u8>,
    pub blind_bidding_available: bool,
    pub spades_broken: bool,
    pub player_score: i32,
    pub computer_score: i32,
    pub player_bags: i32,
    pub computer_bags: i32,
    pub player_tricks: u8,
    pub computer_tricks: u8,
    pub target_score: i32,
    pub first_leader: Seat,
    pub turn: Option<Seat>,
    pub trick_number: usize,
    pub current_trick: Vec<TrickPlay>,
    pub trick_completed: bool,
    /// Winner of the trick still on display, if one just resolved.
    pub trick_winner: Option<Seat>,
    pub trick_history: Vec<TrickRecord>,
    /// Cards the player may legally play right now; empty off-turn.
    pub legal_plays: Vec<Card>,
    pub hand_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_results: Option<HandResult>,
    pub game_over: bool,
    pub winner: Option<Winner>,
    pub message: Option<String>,
    pub show_computer_hand: bool,
}

/// Display name with parity tag, e.g. "Marta (Odd)".
pub fn seat_display(seat: Seat) -> String {
    let (name, parity) = match seat {
        Seat::Player => (PLAYER_NAME, Seat::Player.parity()),
        Seat::Computer => (COMPUTER_NAME, Seat::Computer.parity()),
    };
    format!("{name} ({parity:?})")
}

impl StateView {
    pub fn from_session(session: &GameSession) -> Self {
        let player_legal = if session.phase == Phase::Playing
            && session.turn == Some(Seat::Player)
            && !session.trick_completed
        {
            legal_plays(
                &session.player_hand,
                session.trick_lead(),
                session.spades_broken,
            )
        } else {
            Vec::new()
        };

        Self {
            phase: session.phase,
            hand_number: session.hand_number,
            player_name: seat_display(Seat::Player),
            computer_name: seat_display(Seat::Computer),
            player_parity: Seat::Player.parity(),
            computer_parity: Seat::Computer.parity(),
            player_hand: session.player_hand.clone(),
            computer_hand: session
                .show_computer_hand
                .then(|| session.computer_hand.clone()),
            computer_hand_count: session.computer_hand.len(),
            player_discarded: session.discards[Seat::Player].is_some(),
            computer_discarded: session.discards[Seat::Computer].is_some(),
            player_bid: session.bids[Seat::Player],
            computer_bid: session.bids[Seat::Computer],
            blind_bid: session.blind_bid,
            computer_blind_bid: session.computer_blind_bid,
            blind_bidding_available: session.blind_bidding_available,
            spades_broken: session.spades_broken,
            player_score: session.scores[Seat::Player],
            computer_score: session.scores[Seat::Computer],
            player_bags: session.bags[Seat::Player],
            computer_bags: session.bags[Seat::Computer],
            player_tricks: session.tricks_won[Seat::Player],
            computer_tricks: session.tricks_won[Seat::Computer],
            target_score: TARGET_SCORE,
            first_leader: session.first_leader,
            turn: session.turn,
            trick_number: session.trick_number,
            current_trick: session.current_trick.clone(),
            trick_completed: session.trick_completed,
            trick_winner: session
                .trick_completed
                .then_some(session.last_trick_winner)
                .flatten(),
            trick_history: session.trick_history.clone(),
            legal_plays: player_legal,
            hand_over: session.hand_over,
            hand_results: session.hand_results.clone(),
            game_over: session.game_over,
            winner: session.winner,
            message: session.message.clone(),
            show_computer_hand: session.show_computer_hand,
        }
    }
}
