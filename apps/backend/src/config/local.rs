use std::time::Duration;

use crate::domain::{Difficulty, PlayerId};

pub const MIN_AI_OPPONENTS: usize = 1;
pub const MAX_AI_OPPONENTS: usize = 4;

/// Settings for a single-human game against computer opponents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalGameConfig {
    pub human_player_id: PlayerId,
    pub human_nickname: String,
    /// Number of AI opponents, 1 to 4.
    pub ai_count: usize,
    pub ai_difficulty: Difficulty,
    pub trick_clear_delay: Duration,
    /// Fixes dealing, seating names and AI randomness when set.
    pub seed: Option<u64>,
}

impl LocalGameConfig {
    pub fn new(human_player_id: impl Into<PlayerId>, human_nickname: impl Into<String>) -> Self {
        Self {
            human_player_id: human_player_id.into(),
            human_nickname: human_nickname.into(),
            ai_count: 3,
            ai_difficulty: Difficulty::Medium,
            trick_clear_delay: Duration::from_millis(1500),
            seed: None,
        }
    }

    pub fn with_ai(mut self, count: usize, difficulty: Difficulty) -> Self {
        self.ai_count = count;
        self.ai_difficulty = difficulty;
        self
    }

    pub fn with_trick_clear_delay(mut self, delay: Duration) -> Self {
        self.trick_clear_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
