//! Card parsing from string representations (e.g., "AS", "2C")

use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::GameError;

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (rank_ch, suit_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => (r, su),
            _ => return Err(GameError::invalid_input(format!("parse card: {s}"))),
        };
        let rank = match rank_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(GameError::invalid_input(format!("parse card: {s}"))),
        };
        let suit = match suit_ch {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(GameError::invalid_input(format!("parse card: {s}"))),
        };
        Ok(Card { suit, rank })
    }
}

/// Parse a sequence of card tokens (e.g., "AS", "2C"), failing on the first
/// invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, GameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
