//! AI player module - automated bet and play decisions for seated bots.
//!
//! This module provides:
//! - The `AiPlayer` trait every strategy implements
//! - `RandomPlayer` (easy), `Heuristic` (medium), `Strategic` (hard)
//! - Decision helpers that fall back to the first legal action when a
//!   strategy errors or answers illegally

mod heuristic;
mod random;
pub mod registry;
mod strategic;
pub mod tactics;
mod trait_def;


pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use strategic::Strategic;
pub use trait_def::{AiError, AiPlayer, PlayChoice};

use tracing::warn;

use crate::domain::player_view::AiView;
use crate::domain::Difficulty;

/// Names handed to computer opponents.
pub const AI_NAMES: [&str; 12] = [
    "Marco",
    "Giulia",
    "Alessandro",
    "Francesca",
    "Luca",
    "Elena",
    "Andrea",
    "Chiara",
    "Matteo",
    "Sara",
    "Giovanni",
    "Valentina",
];

/// Create the AI backing a difficulty tier.
pub fn create_ai(difficulty: Difficulty, seed: Option<u64>) -> Box<dyn AiPlayer> {
    (registry::by_difficulty(difficulty).make)(seed)
}

/// Ask `ai` for a bet, falling back to the smallest legal bet.
pub fn decide_bet(ai: &dyn AiPlayer, view: &AiView) -> Option<u8> {
    let legal = view.legal_bets();
    match ai.choose_bet(view) {
        Ok(bet) if legal.contains(&bet) => Some(bet),
        Ok(bet) => {
            warn!(player_id = %view.player_id, bet, "AI chose an illegal bet; using fallback");
            legal.first().copied()
        }
        Err(err) => {
            warn!(player_id = %view.player_id, error = %err, "AI bet failed; using fallback");
            legal.first().copied()
        }
    }
}

/// Ask `ai` for a card, falling back to the first card in hand.
pub fn decide_play(ai: &dyn AiPlayer, view: &AiView) -> Option<PlayChoice> {
    let fallback = || {
        view.legal_plays().first().map(|c| PlayChoice {
            card_id: c.id.clone(),
            ace_is_high: c.is_ace_of_hearts().then_some(true),
        })
    };
    match ai.choose_play(view) {
        Ok(choice) if view.legal_plays().iter().any(|c| c.id == choice.card_id) => Some(choice),
        Ok(choice) => {
            warn!(
                player_id = %view.player_id,
                card_id = %choice.card_id,
                "AI chose a card it does not hold; using fallback"
            );
            fallback()
        }
        Err(err) => {
            warn!(player_id = %view.player_id, error = %err, "AI play failed; using fallback");
            fallback()
        }
    }
}
