//! Strategic: the hard-difficulty AI.
//!
//! Bidding estimates expected tricks as the sum of per-card win chances
//! (`strength / 50`, capped at 1). The last bidder rounds the estimate;
//! earlier bidders shade it down by 20% and floor it.
//!
//! Play tracks how many tricks are still needed against how many remain:
//! lead low when done, lead high when every remaining trick is needed, and
//! probe with a middle card otherwise. Following, it wins as cheaply as
//! possible when it needs the trick and sheds a losing card when it does
//! not, falling back to its weakest card.

use super::tactics::{
    card_strength, closest_bet, current_winner, losing_card, minimal_winning_card, sorted,
    would_beat,
};
use super::trait_def::{AiError, AiPlayer, PlayChoice};
use crate::domain::player_view::AiView;
use crate::domain::Card;

#[derive(Clone, Default)]
pub struct Strategic;

impl Strategic {
    pub const NAME: &'static str = "Strategic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }

    fn win_probability(card: &Card) -> f64 {
        (card_strength(card) as f64 / 50.0).min(1.0)
    }

    /// High only when a trick is wanted and high actually takes it; low
    /// is always the better try at losing.
    fn ace_choice(view: &AiView, card: &Card, needed: i32) -> Option<bool> {
        if !card.is_ace_of_hearts() {
            return None;
        }
        if view.is_leading() {
            return Some(needed > 0);
        }
        Some(needed > 0 && would_beat(card, current_winner(&view.trick), true))
    }
}

impl AiPlayer for Strategic {
    fn choose_bet(&self, view: &AiView) -> Result<u8, AiError> {
        let expected: f64 = view.hand.iter().map(Self::win_probability).sum();
        let target = if view.is_last_to_bet() {
            expected.round()
        } else {
            (expected * 0.8).floor()
        };
        closest_bet(target as i32, &view.legal_bets())
            .ok_or_else(|| AiError::InvalidMove("No legal bets available".into()))
    }

    fn choose_play(&self, view: &AiView) -> Result<PlayChoice, AiError> {
        let hand = sorted(view.legal_plays());
        let (Some(weakest), Some(strongest)) = (hand.first(), hand.last()) else {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        };
        let needed = view.tricks_needed();
        let remaining = hand.len() as i32;

        let card = if view.is_leading() {
            if needed <= 0 {
                weakest
            } else if needed >= remaining {
                strongest
            } else {
                &hand[hand.len() / 2]
            }
        } else {
            let winner = current_winner(&view.trick);
            let pick = if needed > 0 {
                minimal_winning_card(&hand, winner)
            } else {
                losing_card(&hand, winner)
            };
            pick.unwrap_or(weakest)
        };

        Ok(PlayChoice {
            card_id: card.id.clone(),
            ace_is_high: Self::ace_choice(view, card, needed),
        })
    }
}
