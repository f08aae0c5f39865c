//! Action orchestration: validates each externally invoked action, applies
//! it to the session, and runs any pending computer response synchronously
//! so the caller always observes a settled state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::ai::{
    BidContext, BlindContext, DiscardContext, MartaPolicy, OpponentPolicy, PlayContext,
    PolicyConfig,
};
use crate::domain::dealing::deal_hands_with;
use crate::domain::rules::{
    blind_eligible, deficit, leader_for_hand, legal_plays, valid_bid_range,
    valid_blind_bid_range,
};
use crate::domain::scoring::settle_hand;
use crate::domain::snapshot::{seat_display, StateView};
use crate::domain::state::{require_phase, GameSession, Phase, Seat, Winner};
use crate::domain::tricks::{self, PlayOutcome};
use crate::errors::GameError;

/// One game of two-player Spades against a pluggable computer opponent.
///
/// Every public method is one externally invokable action. Methods return
/// an error without touching the session when the action is invalid, and
/// otherwise apply the human action plus any computer response before
/// returning.
pub struct GameEngine {
    session: GameSession,
    policy: Box<dyn OpponentPolicy>,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Engine with a custom policy. `seed` fixes the deal order for
    /// reproducible games; `None` seeds from the OS.
    pub fn new(policy: Box<dyn OpponentPolicy>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        let mut engine = Self {
            session: GameSession::fresh(),
            policy,
            rng,
        };
        engine.start_hand();
        engine
    }

    /// Engine with the default heuristic opponent.
    pub fn with_marta(config: PolicyConfig, seed: Option<u64>) -> Self {
        Self::new(Box::new(MartaPolicy::new(config)), seed)
    }

    /// Resume play over a session restored from the storage boundary.
    pub fn from_session(
        session: GameSession,
        policy: Box<dyn OpponentPolicy>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            session,
            policy,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state_view(&self) -> StateView {
        StateView::from_session(&self.session)
    }

    /// Discard and replace the whole session; scores reset to zero.
    pub fn new_game(&mut self) {
        info!("starting new game");
        self.session = GameSession::fresh();
        self.start_hand();
    }

    pub fn toggle_computer_hand(&mut self) {
        self.session.show_computer_hand = !self.session.show_computer_hand;
    }

    /// Commit to a blind Nil: bid 0 before acting on the dealt hand, with
    /// all deltas doubled.
    pub fn choose_blind_nil(&mut self) -> Result<(), GameError> {
        require_phase(&self.session, Phase::BlindDecision, "choose_blind_nil")?;
        self.session.blind_bid = Some(0);
        self.session.phase = Phase::Discard;
        self.session.message = Some("You bid Nil (BLIND). Select a card to discard.".into());
        debug!("player committed blind Nil");
        Ok(())
    }

    /// Opt in to blind bidding; the bid itself follows via [`blind_bid`].
    ///
    /// [`blind_bid`]: GameEngine::blind_bid
    pub fn choose_blind_bidding(&mut self) -> Result<(), GameError> {
        require_phase(&self.session, Phase::BlindDecision, "choose_blind_bidding")?;
        if !self.session.blind_bidding_available {
            return Err(GameError::invalid_phase(
                "blind bidding requires a 100-point deficit",
            ));
        }
        self.session.phase = Phase::BlindBidding;
        self.session.message = Some("Going BLIND! Choose a bid of 5-10 tricks.".into());
        Ok(())
    }

    /// Decline the blind path and play the hand normally.
    pub fn choose_normal_bidding(&mut self) -> Result<(), GameError> {
        require_phase(&self.session, Phase::BlindDecision, "choose_normal_bidding")?;
        self.session.phase = Phase::Discard;
        self.session.message = Some("Playing it straight. Select a card to discard.".into());
        Ok(())
    }

    /// Record the player's blind bid (5..=10).
    pub fn blind_bid(&mut self, bid: u8) -> Result<(), GameError> {
        require_phase(&self.session, Phase::BlindBidding, "blind_bid")?;
        if !valid_blind_bid_range().contains(&bid) {
            return Err(GameError::invalid_input(format!(
                "blind bid must be 5-10, got {bid}"
            )));
        }
        self.session.blind_bid = Some(bid);
        self.session.phase = Phase::Discard;
        self.session.message = Some(format!(
            "You bid {bid} (BLIND). Select a card to discard."
        ));
        debug!(bid, "player blind bid recorded");
        Ok(())
    }

    /// Move the indicated hand card face down into the discard pile. The
    /// computer discards in the same step, and bidding (or play, when both
    /// seats already bid blind) begins.
    pub fn discard(&mut self, index: usize) -> Result<(), GameError> {
        // Checked before the phase so a duplicate reads as such; the phase
        // machine has already moved on by the time one can happen.
        if self.session.discards[Seat::Player].is_some() {
            return Err(GameError::already_acted("you already discarded this hand"));
        }
        require_phase(&self.session, Phase::Discard, "discard")?;
        if index >= self.session.player_hand.len() {
            return Err(GameError::invalid_input(format!(
                "discard index {index} out of range"
            )));
        }

        let card = self.session.player_hand.remove(index);
        self.session.discards[Seat::Player] = Some(card);

        self.computer_discard();
        self.after_discards();
        Ok(())
    }

    /// Record the player's normal bid; the computer bids in response if it
    /// has not already, and trick play begins.
    pub fn bid(&mut self, bid: u8) -> Result<(), GameError> {
        // A blind commitment counts as the hand's bid.
        if self.session.effective_bid(Seat::Player).is_some() {
            return Err(GameError::already_acted("you already bid this hand"));
        }
        require_phase(&self.session, Phase::Bidding, "bid")?;
        if !valid_bid_range().contains(&bid) {
            return Err(GameError::invalid_input(format!(
                "bid must be 0-10, got {bid}"
            )));
        }
        self.session.bids[Seat::Player] = Some(bid);

        if self.session.effective_bid(Seat::Computer).is_none() {
            self.computer_bid();
        }
        self.begin_play();
        Ok(())
    }

    /// Play the indicated card from the player's hand.
    pub fn play(&mut self, index: usize) -> Result<PlayOutcome, GameError> {
        require_phase(&self.session, Phase::Playing, "play")?;
        if index >= self.session.player_hand.len() {
            return Err(GameError::invalid_input(format!(
                "play index {index} out of range"
            )));
        }
        let card = self.session.player_hand[index];
        let outcome = tricks::play_card(&mut self.session, Seat::Player, card)?;
        debug!(card = %card.label(), trick = self.session.trick_number, "player played");

        if outcome.trick_completed {
            self.finish_trick(outcome);
            return Ok(outcome);
        }

        // Computer follows immediately so the returned state is settled.
        let outcome = self.computer_play();
        if outcome.trick_completed {
            self.finish_trick(outcome);
        }
        Ok(outcome)
    }

    /// Clear a resolved trick from display; the winner leads the next
    /// trick, with the computer acting inline when it is the winner.
    pub fn clear_trick(&mut self) -> Result<(), GameError> {
        let next_leader = tricks::clear_trick(&mut self.session)?;
        if next_leader == Some(Seat::Computer) {
            let outcome = self.computer_play();
            // A computer lead never completes a trick, but guard anyway.
            if outcome.trick_completed {
                self.finish_trick(outcome);
            }
        }
        Ok(())
    }

    /// Reset hand-scoped state, advance the hand counter, and re-deal.
    pub fn next_hand(&mut self) -> Result<(), GameError> {
        if self.session.game_over {
            return Err(GameError::invalid_phase("game is over, start a new game"));
        }
        if !self.session.hand_over {
            return Err(GameError::invalid_phase("hand is still in progress"));
        }
        self.session.hand_number += 1;
        self.start_hand();
        Ok(())
    }

    /// Deal a hand and run the pre-deal blind decisions for both seats.
    fn start_hand(&mut self) {
        let leader = leader_for_hand(Seat::odd_seat(), self.session.hand_number);
        let deal = deal_hands_with(&mut self.rng);
        self.session
            .reset_for_hand(deal.player_hand, deal.computer_hand, leader);
        self.session.phase = Phase::Discard;

        let scores = self.session.scores;
        let player_deficit = deficit(scores[Seat::Player], scores[Seat::Computer]);

        // The computer's blind decision happens before it looks at its
        // cards, on the deficit alone.
        if blind_eligible(scores[Seat::Computer], scores[Seat::Player]) {
            let ctx = BlindContext {
                deficit: deficit(scores[Seat::Computer], scores[Seat::Player]),
            };
            match self.policy.choose_blind(&ctx) {
                Ok(Some(bid)) if valid_blind_bid_range().contains(&bid) => {
                    self.session.computer_blind_bid = Some(bid);
                    info!(bid, "computer bid blind");
                }
                Ok(Some(bid)) => {
                    warn!(bid, "policy blind bid out of range, declining");
                }
                Ok(None) => {}
                Err(err) => warn!(%err, "policy blind decision failed, declining"),
            }
        }

        if blind_eligible(scores[Seat::Player], scores[Seat::Computer]) {
            self.session.blind_bidding_available = true;
            self.session.phase = Phase::BlindDecision;
            self.session.message = Some(format!(
                "Hand {}. You are down by {player_deficit} points - go BLIND for double \
                 points, or bid normally?",
                self.session.hand_number
            ));
        } else {
            self.session.message = Some(format!(
                "Hand {}. Select a card to discard.",
                self.session.hand_number
            ));
        }
        info!(
            hand = self.session.hand_number,
            leader = %seat_display(leader),
            "hand dealt"
        );
    }

    fn computer_discard(&mut self) {
        let ctx = DiscardContext {
            hand: &self.session.computer_hand,
            my_parity: Seat::Computer.parity(),
        };
        let index = match self.policy.choose_discard(&ctx) {
            Ok(i) if i < self.session.computer_hand.len() => i,
            Ok(i) => {
                warn!(index = i, "policy discard index out of range, using 0");
                0
            }
            Err(err) => {
                warn!(%err, "policy discard failed, using 0");
                0
            }
        };
        let card = self.session.computer_hand.remove(index);
        self.session.discards[Seat::Computer] = Some(card);
    }

    /// After both discards: enter bidding, or straight to play when the
    /// player already committed blind (the computer bids inline first).
    fn after_discards(&mut self) {
        if self.session.effective_bid(Seat::Player).is_some() {
            if self.session.effective_bid(Seat::Computer).is_none() {
                self.computer_bid();
            }
            self.begin_play();
        } else {
            self.session.phase = Phase::Bidding;
            self.session.message = Some("Cards discarded. Make your bid (0-10).".into());
        }
    }

    fn computer_bid(&mut self) {
        let scores = self.session.scores;
        let ctx = BidContext {
            hand: &self.session.computer_hand,
            opponent_bid: self.session.effective_bid(Seat::Player),
            my_score: scores[Seat::Computer],
            opponent_score: scores[Seat::Player],
            my_bags: self.session.bags[Seat::Computer],
        };
        let bid = match self.policy.choose_bid(&ctx) {
            Ok(b) if valid_bid_range().contains(&b) => b,
            Ok(b) => {
                warn!(bid = b, "policy bid out of range, clamping");
                b.min(*valid_bid_range().end())
            }
            Err(err) => {
                warn!(%err, "policy bid failed, bidding 0");
                0
            }
        };
        self.session.bids[Seat::Computer] = Some(bid);
        debug!(bid, "computer bid recorded");
    }

    /// Both bids are in: start the first trick, with the computer leading
    /// inline when the hand's leader is the computer seat.
    fn begin_play(&mut self) {
        self.session.phase = Phase::Playing;
        self.session.turn = Some(self.session.first_leader);

        let player_bid = self.describe_bid(Seat::Player);
        let computer_bid = self.describe_bid(Seat::Computer);
        let lead_note = match self.session.first_leader {
            Seat::Player => "Your turn to lead the first trick.",
            Seat::Computer => "Marta leads the first trick.",
        };
        self.session.message = Some(format!(
            "You bid {player_bid}, Marta bid {computer_bid}. {lead_note}"
        ));

        if self.session.first_leader == Seat::Computer {
            self.computer_play();
        }
    }

    fn describe_bid(&self, seat: Seat) -> String {
        let bid = self.session.effective_bid(seat).unwrap_or(0);
        if self.session.bid_is_blind(seat) {
            format!("{bid} (BLIND)")
        } else {
            bid.to_string()
        }
    }

    /// Let the policy pick a card and play it, falling back to the lowest
    /// legal card on any policy failure.
    fn computer_play(&mut self) -> PlayOutcome {
        let legal = legal_plays(
            &self.session.computer_hand,
            self.session.trick_lead(),
            self.session.spades_broken,
        );
        let Some(fallback) = legal.iter().copied().min_by_key(|c| c.rank.value()) else {
            warn!("computer has no legal plays");
            return PlayOutcome {
                trick_completed: false,
                trick_winner: None,
                hand_finished: false,
            };
        };
        let ctx = PlayContext {
            hand: &self.session.computer_hand,
            lead: self.session.trick_lead(),
            spades_broken: self.session.spades_broken,
            legal: &legal,
            my_bid: self.session.effective_bid(Seat::Computer).unwrap_or(0),
            my_tricks: self.session.tricks_won[Seat::Computer],
            my_bags: self.session.bags[Seat::Computer],
        };
        let card = match self.policy.choose_play(&ctx) {
            Ok(c) if legal.contains(&c) => c,
            Ok(c) => {
                warn!(card = %c.label(), "policy chose illegal card, using lowest legal");
                fallback
            }
            Err(err) => {
                warn!(%err, "policy play failed, using lowest legal");
                fallback
            }
        };
        match tricks::play_card(&mut self.session, Seat::Computer, card) {
            Ok(outcome) => {
                debug!(card = %card.label(), trick = self.session.trick_number, "computer played");
                outcome
            }
            // Unreachable once the card came from legal_plays; keep the
            // session consistent rather than panicking.
            Err(err) => {
                warn!(%err, "computer play rejected");
                PlayOutcome {
                    trick_completed: false,
                    trick_winner: None,
                    hand_finished: false,
                }
            }
        }
    }

    /// A trick just resolved: narrate it, and run settlement when it was
    /// the hand's last trick.
    fn finish_trick(&mut self, outcome: PlayOutcome) {
        if let Some(winner) = outcome.trick_winner {
            self.session.message = Some(match winner {
                Seat::Player => "You win the trick!".into(),
                Seat::Computer => "Marta wins the trick.".into(),
            });
        }
        if outcome.hand_finished {
            match settle_hand(&mut self.session) {
                Ok(_) => self.set_hand_end_message(),
                Err(err) => warn!(%err, "settlement failed"),
            }
        }
    }

    fn set_hand_end_message(&mut self) {
        let player = self.session.scores[Seat::Player];
        let computer = self.session.scores[Seat::Computer];
        self.session.message = Some(if self.session.game_over {
            match self.session.winner {
                Some(Winner::Player) => {
                    format!("GAME OVER! You WIN {player} to {computer}!")
                }
                Some(Winner::Computer) => {
                    format!("GAME OVER! Marta WINS {computer} to {player}!")
                }
                _ => format!("GAME OVER! TIE at {player} points each!"),
            }
        } else {
            format!("Hand complete. Score: you {player}, Marta {computer}.")
        });
    }
}
