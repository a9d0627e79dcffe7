pub mod local_game;
pub mod scheduler;

pub use local_game::{LocalGame, SubscriptionId};
pub use scheduler::{thinking_delay, DelayedTask};
