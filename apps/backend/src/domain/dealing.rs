//! Deck construction, shuffling and dealing.

use rand::Rng;

use crate::domain::cards_logic::sort_hand;
use crate::domain::cards_types::{Card, Suit, ACE, KING};
use crate::domain::rules::{deck_count, DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Build `decks` standard 52-card decks merged together. Cards keep
/// distinct ids through the deck index.
pub fn build_deck(decks: usize) -> Vec<Card> {
    let mut deck = Vec::with_capacity(decks * DECK_SIZE);
    for d in 0..decks {
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                deck.push(Card::new(suit, rank, d));
            }
        }
    }
    deck
}

/// Fisher-Yates shuffle.
pub fn shuffle<R: Rng>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Deal `cards_per_player` cards to each of `player_count` seats from a
/// freshly shuffled deck, one card per seat at a time. The undealt rest
/// is discarded. Hands come back sorted weakest to strongest.
pub fn deal_hands<R: Rng>(
    player_count: usize,
    cards_per_player: u8,
    rng: &mut R,
) -> Result<Vec<Vec<Card>>, DomainError> {
    if player_count < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("At least {MIN_PLAYERS} players are needed"),
        ));
    }
    if player_count > MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::TooManyPlayers,
            format!("At most {MAX_PLAYERS} players can sit at a table"),
        ));
    }

    let mut deck = build_deck(deck_count(player_count));
    let needed = player_count * cards_per_player as usize;
    if needed > deck.len() {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughCards,
            format!("Dealing {needed} cards needs more than {} in the deck", deck.len()),
        ));
    }
    shuffle(&mut deck, rng);

    let mut hands: Vec<Vec<Card>> = (0..player_count)
        .map(|_| Vec::with_capacity(cards_per_player as usize))
        .collect();
    for (i, card) in deck.into_iter().take(needed).enumerate() {
        hands[i % player_count].push(card);
    }
    for hand in &mut hands {
        sort_hand(hand);
    }
    Ok(hands)
}
