//! Flat persisted layout for [`GameSession`].
//!
//! The session must round-trip through the storage boundary as a flat keyed
//! structure whose field names are the contract with the presentation layer,
//! so the per-seat pairs serialize as `player_*`/`computer_*` keys rather
//! than nested objects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::Card;
use super::scoring::HandResult;
use super::state::{BySeat, GameSession, Phase, Seat, TrickPlay, TrickRecord, Winner};

#[derive(Serialize, Deserialize)]
struct SessionRepr {
    phase: Phase,
    hand_number: u32,
    player_hand: Vec<Card>,
    computer_hand: Vec<Card>,
    player_discarded: Option<Card>,
    computer_discarded: Option<Card>,
    player_bid: Option<u8>,
    computer_bid: Option<u8>,
    blind_bid: Option<u8>,
    computer_blind_bid: Option<u8>,
    blind_bidding_available: bool,
    spades_broken: bool,
    player_score: i32,
    computer_score: i32,
    player_bags: i32,
    computer_bags: i32,
    player_tricks: u8,
    computer_tricks: u8,
    player_special_pulls: i32,
    computer_special_pulls: i32,
    first_leader: Seat,
    turn: Option<Seat>,
    trick_number: usize,
    current_trick: Vec<TrickPlay>,
    trick_completed: bool,
    trick_winner: Option<Seat>,
    trick_history: Vec<TrickRecord>,
    hand_over: bool,
    hand_results: Option<HandResult>,
    game_over: bool,
    winner: Option<Winner>,
    message: Option<String>,
    show_computer_hand: bool,
}

impl From<&GameSession> for SessionRepr {
    fn from(s: &GameSession) -> Self {
        Self {
            phase: s.phase,
            hand_number: s.hand_number,
            player_hand: s.player_hand.clone(),
            computer_hand: s.computer_hand.clone(),
            player_discarded: s.discards.player,
            computer_discarded: s.discards.computer,
            player_bid: s.bids.player,
            computer_bid: s.bids.computer,
            blind_bid: s.blind_bid,
            computer_blind_bid: s.computer_blind_bid,
            blind_bidding_available: s.blind_bidding_available,
            spades_broken: s.spades_broken,
            player_score: s.scores.player,
            computer_score: s.scores.computer,
            player_bags: s.bags.player,
            computer_bags: s.bags.computer,
            player_tricks: s.tricks_won.player,
            computer_tricks: s.tricks_won.computer,
            player_special_pulls: s.special_pulls.player,
            computer_special_pulls: s.special_pulls.computer,
            first_leader: s.first_leader,
            turn: s.turn,
            trick_number: s.trick_number,
            current_trick: s.current_trick.clone(),
            trick_completed: s.trick_completed,
            trick_winner: s.last_trick_winner,
            trick_history: s.trick_history.clone(),
            hand_over: s.hand_over,
            hand_results: s.hand_results.clone(),
            game_over: s.game_over,
            winner: s.winner,
            message: s.message.clone(),
            show_computer_hand: s.show_computer_hand,
        }
    }
}

impl From<SessionRepr> for GameSession {
    fn from(r: SessionRepr) -> Self {
        Self {
            phase: r.phase,
            hand_number: r.hand_number,
            player_hand: r.player_hand,
            computer_hand: r.computer_hand,
            discards: BySeat {
                player: r.player_discarded,
                computer: r.computer_discarded,
            },
            bids: BySeat {
                player: r.player_bid,
                computer: r.computer_bid,
            },
            blind_bid: r.blind_bid,
            computer_blind_bid: r.computer_blind_bid,
            blind_bidding_available: r.blind_bidding_available,
            spades_broken: r.spades_broken,
            scores: BySeat {
                player: r.player_score,
                computer: r.computer_score,
            },
            bags: BySeat {
                player: r.player_bags,
                computer: r.computer_bags,
            },
            tricks_won: BySeat {
                player: r.player_tricks,
                computer: r.computer_tricks,
            },
            special_pulls: BySeat {
                player: r.player_special_pulls,
                computer: r.computer_special_pulls,
            },
            first_leader: r.first_leader,
            turn: r.turn,
            trick_number: r.trick_number,
            current_trick: r.current_trick,
            trick_completed: r.trick_completed,
            last_trick_winner: r.trick_winner,
            trick_history: r.trick_history,
            hand_over: r.hand_over,
            hand_results: r.hand_results,
            game_over: r.game_over,
            winner: r.winner,
            message: r.message,
            show_computer_hand: r.show_computer_hand,
        }
    }
}

impl Serialize for GameSession {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SessionRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameSession {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        SessionRepr::deserialize(deserializer).map(GameSession::from)
    }
}
