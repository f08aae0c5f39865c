//! The shipped heuristic opponent.
//!
//! Marta estimates her trick expectation from spade honors, protected
//! kings, and suit length, bids around that estimate with score- and
//! bag-based adjustments, discards low non-spades with a light parity
//! preference, and plays smallest-winning-or-lowest with bag avoidance
//! once her bid is met.

use std::sync::Mutex;

use rand::prelude::*;
use tracing::debug;

use super::config::PolicyConfig;
use super::trait_def::{
    BidContext, BlindContext, DiscardContext, OpponentPolicy, PlayContext, PolicyError,
};
use crate::domain::cards_logic::{follower_wins, is_special_card};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::valid_blind_bid_range;
use crate::domain::state::Parity;

/// Estimated trick-taking capability of a hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStrength {
    /// Tricks that are nearly guaranteed (high spades, off-suit aces).
    pub sure: f64,
    /// Tricks that depend on distribution (long suits, guarded honors).
    pub probable: f64,
    /// Strategic value of holding the bag-reducing cards.
    pub special_bonus: f64,
}

impl HandStrength {
    pub fn total(&self) -> f64 {
        self.sure + self.probable + self.special_bonus
    }
}

/// Weigh a hand's expected tricks. Spades are trump, so spade honors and
/// length dominate; off-suit honors are discounted for ruff risk.
pub fn analyze_hand_strength(hand: &[Card]) -> HandStrength {
    let mut sure = 0.0;
    let mut probable = 0.0;
    let mut special_bonus = 0.0;

    for &card in hand {
        if is_special_card(card) {
            special_bonus += 0.2;
        }
    }

    let spade_values: Vec<u8> = hand
        .iter()
        .filter(|c| c.suit == Suit::Spades)
        .map(|c| c.rank.value())
        .collect();

    let has_spade_ace = spade_values.contains(&14);
    if has_spade_ace {
        sure += 0.95;
    }
    if spade_values.contains(&13) {
        sure += if has_spade_ace { 0.8 } else { 0.65 };
    }
    if spade_values.contains(&12) {
        let honors = spade_values.iter().filter(|&&v| v >= 11).count();
        probable += if honors >= 2 { 0.6 } else { 0.3 };
    }

    let spade_count = spade_values.len();
    if spade_count >= 5 {
        probable += (spade_count - 4) as f64 * 0.4;
    } else if spade_count >= 3 {
        probable += (spade_count - 2) as f64 * 0.25;
    }

    for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let values: Vec<u8> = hand
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.value())
            .collect();
        if values.is_empty() {
            continue;
        }
        let has_ace = values.contains(&14);
        if has_ace {
            sure += 0.75;
        }
        if values.contains(&13) {
            if has_ace {
                probable += 0.5;
            } else if values.len() >= 3 {
                probable += 0.4;
            } else {
                probable += 0.25;
            }
        }
        if values.len() >= 4 {
            probable += (values.len() - 3) as f64 * 0.2;
        }
    }

    HandStrength {
        sure,
        probable,
        special_bonus,
    }
}

pub struct MartaPolicy {
    config: PolicyConfig,
    rng: Mutex<StdRng>,
}

impl MartaPolicy {
    pub const NAME: &'static str = "marta";

    pub fn new(config: PolicyConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, PolicyError> {
        self.rng
            .lock()
            .map_err(|e| PolicyError::Internal(format!("RNG lock poisoned: {e}")))
    }

    /// Nil only with a truly weak hand, few spades, no mid-high off-suit
    /// cards, and only when trailing enough for 100 points to matter.
    fn should_bid_nil(&self, ctx: &BidContext<'_>, strength: &HandStrength) -> bool {
        if strength.total() > self.config.nil_threshold {
            return false;
        }
        let spade_count = ctx.hand.iter().filter(|c| c.suit == Suit::Spades).count();
        if spade_count > 2 {
            return false;
        }
        let weak_off_suit = ctx
            .hand
            .iter()
            .filter(|c| c.suit != Suit::Spades)
            .all(|c| c.rank.value() <= 8);
        if !weak_off_suit {
            return false;
        }
        // Never race an opposing Nil with one of our own.
        if ctx.opponent_bid == Some(0) {
            return false;
        }
        ctx.my_score < ctx.opponent_score - 30
    }
}

impl OpponentPolicy for MartaPolicy {
    /// The hand is not dealt yet, so the decision rides on the deficit
    /// alone: the further behind, the more likely the gamble, capped at a
    /// 70% chance. The committed bid scales with the deficit.
    fn choose_blind(&self, ctx: &BlindContext) -> Result<Option<u8>, PolicyError> {
        if ctx.deficit < self.config.blind_deficit {
            return Ok(None);
        }
        let probability = (((ctx.deficit - 100) as f64) / 200.0).min(0.7);
        let mut rng = self.rng()?;
        if !rng.random_bool(probability.max(0.0)) {
            return Ok(None);
        }
        let range = valid_blind_bid_range();
        let bid = (*range.start() as i32 + (ctx.deficit - self.config.blind_deficit) / 80)
            .clamp(*range.start() as i32, 8) as u8;
        debug!(deficit = ctx.deficit, bid, "blind bid accepted");
        Ok(Some(bid))
    }

    fn choose_bid(&self, ctx: &BidContext<'_>) -> Result<u8, PolicyError> {
        let strength = analyze_hand_strength(ctx.hand);
        if self.should_bid_nil(ctx, &strength) {
            debug!(expectation = strength.total(), "attempting Nil");
            return Ok(0);
        }

        let mut expectation = strength.total();

        // Conservative when ahead, pushier when behind.
        if ctx.my_score > ctx.opponent_score + 30 {
            expectation *= 0.92;
        } else if ctx.my_score < ctx.opponent_score - 30 {
            expectation *= 1.08;
        }

        if ctx.my_bags >= self.config.bag_caution {
            expectation *= 0.88;
        }

        match ctx.opponent_bid {
            // Opponent went Nil: bid up to set them.
            Some(0) => expectation += 0.4,
            Some(b) if b <= 2 => expectation += 0.2,
            Some(b) if b >= 7 => expectation -= 0.3,
            _ => {}
        }

        let mut bid = expectation.round().clamp(0.0, 10.0) as u8;
        if (1.8..=6.2).contains(&expectation) {
            bid = bid.clamp(2, 5);
        }

        // A combined bid near 10 telegraphs the hand; sometimes shade it.
        if let Some(opponent_bid) = ctx.opponent_bid {
            let combined = bid as i32 + opponent_bid as i32;
            let mut rng = self.rng()?;
            if (combined - 10).abs() <= 1 && rng.random_bool(0.4) {
                if bid > 2 {
                    bid -= 1;
                } else if bid < 8 {
                    bid += 1;
                }
            }
        }

        Ok(bid.min(self.config.max_bid))
    }

    /// Score every card and discard the best candidate: never a special
    /// card, spades only under duress, otherwise the lowest card whose
    /// discard value nudges the pile sum toward our parity.
    fn choose_discard(&self, ctx: &DiscardContext<'_>) -> Result<usize, PolicyError> {
        if ctx.hand.is_empty() {
            return Err(PolicyError::InvalidMove("no cards to discard".into()));
        }
        let mut best: Option<(usize, i32)> = None;
        for (i, &card) in ctx.hand.iter().enumerate() {
            let mut score = 0i32;
            if is_special_card(card) {
                score -= 100;
            }
            if card.suit == Suit::Spades {
                score -= card.rank.value() as i32 * 3;
            } else {
                score += 15 - card.rank.value() as i32;
            }
            // An off-parity discard value helps steer the pile sum our way.
            let discard_value = card.rank.discard_value() as i32;
            let helps = match ctx.my_parity {
                Parity::Even => discard_value % 2 == 1,
                Parity::Odd => discard_value % 2 == 0,
            };
            if helps {
                score += 3;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
            .ok_or_else(|| PolicyError::Internal("no discard candidate".into()))
    }

    fn choose_play(&self, ctx: &PlayContext<'_>) -> Result<Card, PolicyError> {
        if ctx.legal.is_empty() {
            return Err(PolicyError::InvalidMove("no legal plays available".into()));
        }

        let Some(lead) = ctx.lead else {
            // Lead low, non-spade and non-special first.
            return ctx
                .legal
                .iter()
                .copied()
                .min_by_key(|c| {
                    (
                        c.suit == Suit::Spades,
                        is_special_card(*c),
                        c.rank.value(),
                    )
                })
                .ok_or_else(|| PolicyError::Internal("no lead candidate".into()));
        };

        let winners: Vec<Card> = ctx
            .legal
            .iter()
            .copied()
            .filter(|&c| follower_wins(lead, c))
            .collect();
        let losers: Vec<Card> = ctx
            .legal
            .iter()
            .copied()
            .filter(|&c| !follower_wins(lead, c))
            .collect();

        let bid_met = ctx.my_bid > 0 && ctx.my_tricks >= ctx.my_bid;
        let want_win = if ctx.my_bid == 0 {
            // On a Nil every trick taken is a disaster.
            false
        } else if is_special_card(lead) {
            // Capturing a special card is worth an overtrick.
            true
        } else {
            !(bid_met && ctx.my_bags >= self.config.bag_caution)
        };

        if want_win {
            if let Some(card) = smallest_winner(&winners) {
                return Ok(card);
            }
        }
        if let Some(card) = cheapest_loser(&losers) {
            return Ok(card);
        }
        smallest_winner(&winners)
            .ok_or_else(|| PolicyError::Internal("no playable card".into()))
    }
}

fn smallest_winner(winners: &[Card]) -> Option<Card> {
    winners
        .iter()
        .copied()
        .min_by_key(|c| (c.suit == Suit::Spades, c.rank.value()))
}

/// Losing plays shed the lowest card while holding on to the specials.
fn cheapest_loser(losers: &[Card]) -> Option<Card> {
    losers
        .iter()
        .copied()
        .min_by_key(|c| (is_special_card(*c), c.rank.value()))
}
