//! Small, pure helpers shared by the heuristic strategies.

use crate::domain::cards_logic::{beats, determine_trick_winner, effective_rank, sort_hand};
use crate::domain::{Card, PlayedCard};

/// Suit power dominates; rank breaks ties within a suit.
pub fn card_strength(card: &Card) -> u32 {
    card.suit.power() as u32 * 15 + effective_rank(card, Some(true)) as u32
}

pub fn current_winner(trick: &[PlayedCard]) -> Option<&PlayedCard> {
    determine_trick_winner(trick).ok()
}

/// Whether `card` played now (with the given ace choice) would take the
/// trick from `target`. With nothing on the table any card "wins".
pub fn would_beat(card: &Card, target: Option<&PlayedCard>, ace_is_high: bool) -> bool {
    let Some(target) = target else {
        return true;
    };
    let challenger = PlayedCard {
        card: card.clone(),
        player_id: String::new(),
        ace_is_high: card.is_ace_of_hearts().then_some(ace_is_high),
    };
    beats(&challenger, target)
}

pub fn sorted(hand: &[Card]) -> Vec<Card> {
    let mut cards = hand.to_vec();
    sort_hand(&mut cards);
    cards
}

/// Weakest card that still wins, trying the Ace of Hearts high.
pub fn minimal_winning_card<'a>(
    sorted_hand: &'a [Card],
    winner: Option<&PlayedCard>,
) -> Option<&'a Card> {
    sorted_hand.iter().find(|c| would_beat(c, winner, true))
}

/// Weakest card that loses, trying the Ace of Hearts low.
pub fn losing_card<'a>(sorted_hand: &'a [Card], winner: Option<&PlayedCard>) -> Option<&'a Card> {
    winner?;
    sorted_hand.iter().find(|c| !would_beat(c, winner, false))
}

/// Legal bet nearest to `target`; the lower one on a tie.
pub fn closest_bet(target: i32, available: &[u8]) -> Option<u8> {
    available
        .iter()
        .copied()
        .min_by_key(|&b| ((b as i32 - target).abs(), b))
}
