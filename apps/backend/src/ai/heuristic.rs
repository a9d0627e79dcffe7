//! Heuristic: the medium-difficulty AI.
//!
//! Bidding:
//! - Count strong cards (any heart, or a diamond ten or better) and bet
//!   roughly 70% of that count, snapped to the closest legal bet.
//!
//! Play:
//! - Leading: strongest card while still short of the bet, weakest otherwise.
//! - Following: cheapest winning card when a trick is wanted, else a card
//!   that loses; the weakest card when neither exists.
//! - Ace of Hearts goes high exactly when tricks are still wanted.
//!
//! Deterministic; no RNG.

use super::tactics::{closest_bet, current_winner, losing_card, minimal_winning_card, sorted};
use super::trait_def::{AiError, AiPlayer, PlayChoice};
use crate::domain::player_view::AiView;
use crate::domain::{Card, Suit};

#[derive(Clone, Default)]
pub struct Heuristic;

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }

    fn is_strong(card: &Card) -> bool {
        card.suit == Suit::Hearts || (card.suit == Suit::Diamonds && card.rank >= 10)
    }
}

impl AiPlayer for Heuristic {
    fn choose_bet(&self, view: &AiView) -> Result<u8, AiError> {
        let strong = view.hand.iter().filter(|c| Self::is_strong(c)).count();
        let target = (strong as f64 * 0.7).round() as i32;
        closest_bet(target, &view.legal_bets())
            .ok_or_else(|| AiError::InvalidMove("No legal bets available".into()))
    }

    fn choose_play(&self, view: &AiView) -> Result<PlayChoice, AiError> {
        let hand = sorted(view.legal_plays());
        let (Some(weakest), Some(strongest)) = (hand.first(), hand.last()) else {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        };
        let needs_wins = view.tricks_needed() > 0;

        let card = if view.is_leading() {
            if needs_wins {
                strongest
            } else {
                weakest
            }
        } else {
            let winner = current_winner(&view.trick);
            let pick = if needs_wins {
                minimal_winning_card(&hand, winner)
            } else {
                losing_card(&hand, winner)
            };
            pick.unwrap_or(weakest)
        };

        Ok(PlayChoice {
            card_id: card.id.clone(),
            ace_is_high: card.is_ace_of_hearts().then_some(needs_wins),
        })
    }
}
