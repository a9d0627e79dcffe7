//! Card comparison and trick resolution.

use crate::domain::cards_types::{Card, PlayedCard};
use crate::errors::domain::DomainError;

pub const ACE_HIGH_RANK: u8 = 14;
pub const ACE_LOW_RANK: u8 = 0;

/// Rank used for comparison. The Ace of Hearts ranks above the king when
/// played high and below the two when played low; without a recorded
/// choice it counts as high. Every other ace is rank 1.
pub fn effective_rank(card: &Card, ace_is_high: Option<bool>) -> u8 {
    if card.is_ace_of_hearts() {
        return match ace_is_high {
            Some(false) => ACE_LOW_RANK,
            _ => ACE_HIGH_RANK,
        };
    }
    card.rank
}

/// Whether `challenger` takes the trick away from `current`.
///
/// Lead suit plays no part: the stronger suit always wins, and within a
/// suit only a strictly higher effective rank displaces the earlier card.
pub fn beats(challenger: &PlayedCard, current: &PlayedCard) -> bool {
    let (cp, wp) = (challenger.card.suit.power(), current.card.suit.power());
    if cp != wp {
        return cp > wp;
    }
    effective_rank(&challenger.card, challenger.ace_is_high)
        > effective_rank(&current.card, current.ace_is_high)
}

pub fn determine_trick_winner(cards: &[PlayedCard]) -> Result<&PlayedCard, DomainError> {
    let (first, rest) = cards
        .split_first()
        .ok_or_else(|| DomainError::invariant("cannot resolve the winner of an empty trick"))?;
    Ok(rest
        .iter()
        .fold(first, |winner, c| if beats(c, winner) { c } else { winner }))
}

/// Weakest to strongest: suit power, then rank with the Ace of Hearts high.
pub fn sort_hand(cards: &mut [Card]) {
    cards.sort_by_key(|c| (c.suit.power(), effective_rank(c, Some(true))));
}
