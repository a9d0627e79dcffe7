//! Random AI player - makes random legal moves.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer, PlayChoice};
use crate::domain::player_view::AiView;

/// AI that makes random legal moves. Backs the easy difficulty.
///
/// Wraps its RNG in a `Mutex` since `AiPlayer` methods take `&self`.
/// Seeded construction gives reproducible behavior in tests.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_bet(&self, view: &AiView) -> Result<u8, AiError> {
        let legal_bets = view.legal_bets();
        if legal_bets.is_empty() {
            return Err(AiError::InvalidMove("No legal bets available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        legal_bets
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random bet".into()))
    }

    fn choose_play(&self, view: &AiView) -> Result<PlayChoice, AiError> {
        let legal_plays = view.legal_plays();
        if legal_plays.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        let card = legal_plays
            .choose(&mut *rng)
            .ok_or_else(|| AiError::Internal("Failed to choose random card".into()))?;
        let ace_is_high = card.is_ace_of_hearts().then(|| rng.random_bool(0.5));

        Ok(PlayChoice {
            card_id: card.id.clone(),
            ace_is_high,
        })
    }
}
