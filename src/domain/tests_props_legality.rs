/// Property-based tests for play legality and dealing invariants.
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::cards_logic::follower_wins;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::{legal_plays, HAND_SIZE};
use crate::domain::{dealing, test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// If a hand contains cards of the lead suit, every legal play is of
    /// that suit and every card of that suit is legal.
    #[test]
    fn prop_follow_suit_legality(
        lead in test_gens::card(),
        hand in test_gens::unique_cards_up_to(11),
    ) {
        let legal = legal_plays(&hand, Some(lead), false);
        let lead_suit_cards: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == lead.suit)
            .collect();

        if lead_suit_cards.is_empty() {
            prop_assert_eq!(legal.len(), hand.len(),
                "void in lead suit frees the whole hand");
        } else {
            for card in &legal {
                prop_assert_eq!(card.suit, lead.suit);
            }
            prop_assert_eq!(legal.len(), lead_suit_cards.len());
        }
    }

    /// Legal plays are always a duplicate-free subset of the hand.
    #[test]
    fn prop_legal_plays_subset(
        hand in test_gens::unique_cards_up_to(11),
        lead in proptest::option::of(test_gens::card()),
        spades_broken in any::<bool>(),
    ) {
        let legal = legal_plays(&hand, lead, spades_broken);
        let legal_set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(legal_set.len(), legal.len());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }

    /// Leading before spades are broken never offers a spade unless the
    /// hand is all spades, and always offers something.
    #[test]
    fn prop_lead_respects_spades_broken(hand in test_gens::unique_cards_up_to(11)) {
        let legal = legal_plays(&hand, None, false);
        prop_assert!(!legal.is_empty());
        let all_spades = hand.iter().all(|c| c.suit == Suit::Spades);
        if !all_spades {
            prop_assert!(legal.iter().all(|c| c.suit != Suit::Spades));
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    /// Trick comparison is antisymmetric for distinct cards played in
    /// either order, unless neither card can beat the other's lead.
    #[test]
    fn prop_follower_wins_antisymmetric(a in test_gens::card(), b in test_gens::card()) {
        prop_assume!(a != b);
        // Both orders cannot produce a winning follower when the suits match.
        if a.suit == b.suit {
            prop_assert!(follower_wins(a, b) != follower_wins(b, a));
        }
    }

    /// Deals partition 22 of the 52 cards with no duplicates.
    #[test]
    fn prop_deal_partition(seed in any::<u64>()) {
        let deal = dealing::deal_hands(seed);
        prop_assert_eq!(deal.player_hand.len(), HAND_SIZE);
        prop_assert_eq!(deal.computer_hand.len(), HAND_SIZE);

        let mut seen: HashSet<Card> = HashSet::new();
        for card in deal.player_hand.iter().chain(deal.computer_hand.iter()) {
            prop_assert!(seen.insert(*card), "duplicate card in deal");
        }
        prop_assert_eq!(seen.len(), 2 * HAND_SIZE);
    }
}
