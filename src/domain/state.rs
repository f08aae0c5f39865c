//! Session state container and phase machine for a single game.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::scoring::HandResult;
use crate::errors::GameError;

/// The two fixed seats. The human sits at [`Seat::Player`], the computer
/// opponent at [`Seat::Computer`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seat {
    Player,
    Computer,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Player => Seat::Computer,
            Seat::Computer => Seat::Player,
        }
    }
}

/// Parity assignment for discard-pile scoring. The player scores even pips,
/// the computer odd pips, fixed for the whole game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Parity {
    Even,
    Odd,
}

impl Seat {
    pub fn parity(self) -> Parity {
        match self {
            Seat::Player => Parity::Even,
            Seat::Computer => Parity::Odd,
        }
    }

    /// The seat holding odd parity, which leads hand 1.
    pub fn odd_seat() -> Seat {
        Seat::Computer
    }
}

/// Per-seat value pair, indexable by [`Seat`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BySeat<T> {
    pub player: T,
    pub computer: T,
}

impl<T> std::ops::Index<Seat> for BySeat<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &T {
        match seat {
            Seat::Player => &self.player,
            Seat::Computer => &self.computer,
        }
    }
}

impl<T> std::ops::IndexMut<Seat> for BySeat<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::Player => &mut self.player,
            Seat::Computer => &mut self.computer,
        }
    }
}

/// Hand progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// An eligible player decides whether to bid blind before seeing cards.
    BlindDecision,
    /// A blind bid (5..=10) is being placed.
    BlindBidding,
    /// Each seat removes one card face down into the discard pile.
    Discard,
    /// Normal bids (0..=10) are being placed.
    Bidding,
    /// Tricks are played; `turn` says who acts.
    Playing,
    /// A seat reached the target or the mercy gap. Terminal.
    GameOver,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Player,
    Computer,
    Tie,
}

/// One card played into a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

/// A completed trick, kept for the hand's history display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickRecord {
    pub trick_number: usize,
    pub plays: Vec<TrickPlay>,
    pub winner: Seat,
}

/// Entire game container, sufficient for pure domain operations.
///
/// Every mutation goes through the engine's action methods; a rejected
/// action leaves the session untouched. Serialization lives in
/// `session_serde`, which flattens the per-seat pairs into the
/// `player_*`/`computer_*` keys of the storage contract.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub phase: Phase,
    /// 1-based hand counter.
    pub hand_number: u32,
    pub player_hand: Vec<Card>,
    pub computer_hand: Vec<Card>,
    /// Face-down discards for the current hand.
    pub discards: BySeat<Option<Card>>,
    /// Normal bids for the current hand.
    pub bids: BySeat<Option<u8>>,
    /// Blind bid, if this seat bid blind this hand.
    pub blind_bid: Option<u8>,
    pub computer_blind_bid: Option<u8>,
    /// Whether the player was offered blind bidding this hand.
    pub blind_bidding_available: bool,
    pub spades_broken: bool,
    pub scores: BySeat<i32>,
    /// Carried bag counts (can go negative).
    pub bags: BySeat<i32>,
    /// Tricks won this hand.
    pub tricks_won: BySeat<u8>,
    /// Bag reductions from special cards captured this hand.
    pub special_pulls: BySeat<i32>,
    /// Who leads the first trick of this hand.
    pub first_leader: Seat,
    /// Seat expected to act, None while no action is pending.
    pub turn: Option<Seat>,
    /// 1-based trick counter within the hand.
    pub trick_number: usize,
    /// Cards on the table for the trick in progress.
    pub current_trick: Vec<TrickPlay>,
    /// A resolved trick is displayed until the caller clears it.
    pub trick_completed: bool,
    pub last_trick_winner: Option<Seat>,
    pub trick_history: Vec<TrickRecord>,
    /// Set once the hand is settled; blocks play until the next hand starts.
    pub hand_over: bool,
    /// Structured settlement record, present only after the hand is over.
    pub hand_results: Option<HandResult>,
    pub game_over: bool,
    pub winner: Option<Winner>,
    /// Status line describing the most recent event.
    pub message: Option<String>,
    pub show_computer_hand: bool,
}

impl GameSession {
    /// Empty shell; the engine deals cards and sets the opening phase.
    pub fn fresh() -> Self {
        Self {
            phase: Phase::BlindDecision,
            hand_number: 1,
            player_hand: Vec::new(),
            computer_hand: Vec::new(),
            discards: BySeat::default(),
            bids: BySeat::default(),
            blind_bid: None,
            computer_blind_bid: None,
            blind_bidding_available: false,
            spades_broken: false,
            scores: BySeat::default(),
            bags: BySeat::default(),
            tricks_won: BySeat::default(),
            special_pulls: BySeat::default(),
            first_leader: Seat::odd_seat(),
            turn: None,
            trick_number: 1,
            current_trick: Vec::with_capacity(2),
            trick_completed: false,
            last_trick_winner: None,
            trick_history: Vec::new(),
            hand_over: false,
            hand_results: None,
            game_over: false,
            winner: None,
            message: None,
            show_computer_hand: false,
        }
    }

    /// Reset per-hand fields for the start of a new hand. Cumulative scores
    /// and bags survive; the caller supplies the freshly dealt hands.
    pub fn reset_for_hand(
        &mut self,
        player_hand: Vec<Card>,
        computer_hand: Vec<Card>,
        first_leader: Seat,
    ) {
        self.player_hand = player_hand;
        self.computer_hand = computer_hand;
        self.discards = BySeat::default();
        self.bids = BySeat::default();
        self.blind_bid = None;
        self.computer_blind_bid = None;
        self.blind_bidding_available = false;
        self.spades_broken = false;
        self.tricks_won = BySeat::default();
        self.special_pulls = BySeat::default();
        self.first_leader = first_leader;
        self.turn = None;
        self.trick_number = 1;
        self.current_trick.clear();
        self.trick_completed = false;
        self.last_trick_winner = None;
        self.trick_history.clear();
        self.hand_over = false;
        self.hand_results = None;
    }

    pub fn hand_of(&self, seat: Seat) -> &Vec<Card> {
        match seat {
            Seat::Player => &self.player_hand,
            Seat::Computer => &self.computer_hand,
        }
    }

    pub fn hand_of_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player => &mut self.player_hand,
            Seat::Computer => &mut self.computer_hand,
        }
    }

    /// Effective bid for a seat: the blind bid when one was placed, the
    /// normal bid otherwise.
    pub fn effective_bid(&self, seat: Seat) -> Option<u8> {
        match seat {
            Seat::Player => self.blind_bid.or(self.bids.player),
            Seat::Computer => self.computer_blind_bid.or(self.bids.computer),
        }
    }

    pub fn bid_is_blind(&self, seat: Seat) -> bool {
        match seat {
            Seat::Player => self.blind_bid.is_some(),
            Seat::Computer => self.computer_blind_bid.is_some(),
        }
    }

    /// Lead card of the trick in progress, if one has been played.
    pub fn trick_lead(&self) -> Option<Card> {
        self.current_trick.first().map(|p| p.card)
    }
}

pub fn require_phase(
    session: &GameSession,
    expected: Phase,
    action: &'static str,
) -> Result<(), GameError> {
    if session.phase == expected {
        Ok(())
    } else {
        Err(GameError::invalid_phase(format!(
            "{action} requires {expected:?}, session is in {:?}",
            session.phase
        )))
    }
}

pub fn require_turn(session: &GameSession, seat: Seat) -> Result<(), GameError> {
    if session.turn == Some(seat) {
        Ok(())
    } else {
        Err(GameError::NotYourTurn)
    }
}
