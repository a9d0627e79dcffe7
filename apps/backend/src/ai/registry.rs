//! How to register an AI
//!
//! 1) Implement `AiPlayer` for your type in its module.
//! 2) Add a new `AiFactory` entry to the static list with stable `name`,
//!    `version` and the difficulty it backs.
//! 3) Determinism: same seed ⇒ same behavior (where applicable).

use crate::ai::{AiPlayer, Heuristic, RandomPlayer, Strategic};
use crate::domain::Difficulty;

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub difficulty: Difficulty,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        difficulty: Difficulty::Easy,
        make: make_random_player,
    },
    AiFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        difficulty: Difficulty::Medium,
        make: make_heuristic,
    },
    AiFactory {
        name: Strategic::NAME,
        version: Strategic::VERSION,
        difficulty: Difficulty::Hard,
        make: make_strategic,
    },
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered AI factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

pub fn by_difficulty(difficulty: Difficulty) -> &'static AiFactory {
    match difficulty {
        Difficulty::Easy => &AI_FACTORIES[0],
        Difficulty::Medium => &AI_FACTORIES[1],
        Difficulty::Hard => &AI_FACTORIES[2],
    }
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(RandomPlayer::new(seed))
}

fn make_heuristic(_seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(Heuristic::new())
}

fn make_strategic(_seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(Strategic::new())
}
