// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::cards_types::{Card, PlayedCard, Suit, ACE, KING};
use crate::domain::dealing::build_deck;
use crate::domain::rules::MAX_PLAYERS;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
        Just(Suit::Spades),
    ]
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), ACE..=KING).prop_map(|(suit, rank)| Card::new(suit, rank, 0))
}

/// A complete trick: one distinct card per player from a two-deck shoe,
/// each Ace of Hearts tagged with a random high/low choice.
pub fn complete_trick() -> impl Strategy<Value = Vec<PlayedCard>> {
    (2..=MAX_PLAYERS)
        .prop_flat_map(|n| {
            (
                Just(build_deck(2)).prop_shuffle(),
                proptest::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(deck, choices)| {
            deck.into_iter()
                .zip(choices)
                .enumerate()
                .map(|(i, (card, high))| {
                    let ace_is_high = card.is_ace_of_hearts().then_some(high);
                    PlayedCard {
                        card,
                        player_id: format!("p{i}"),
                        ace_is_high,
                    }
                })
                .collect()
        })
}

/// (player count, cards per player, per-bidder choice selectors).
pub fn bet_sequence() -> impl Strategy<Value = (usize, u8, Vec<usize>)> {
    (2..=MAX_PLAYERS, 1u8..=5).prop_flat_map(|(n, cards)| {
        (
            Just(n),
            Just(cards),
            proptest::collection::vec(any::<usize>(), n),
        )
    })
}
