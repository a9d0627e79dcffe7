//! Domain layer: pure game logic types and helpers shared by every host.

pub mod bidding;
pub mod cards_logic;
pub mod cards_types;
pub mod dealing;
pub mod game_transition;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_game_transition;

// Re-exports for ergonomics
pub use bidding::{
    available_bets, forbidden_bet, is_legal_bet, place_bet, validate_bet, BetOutcome,
};
pub use cards_logic::{determine_trick_winner, effective_rank, sort_hand};
pub use cards_types::{Card, CardId, PlayedCard, Suit};
pub use game_transition::{
    mark_ready, set_connected, skip_round, skip_turn, start_game, ReadyOutcome, SkipOutcome,
};
pub use player_view::{personalize, AiView};
pub use rules::{cards_for_round, MAX_PLAYERS, MIN_PLAYERS, ROUND_SCHEDULE};
pub use scoring::{calculate_round_score, game_winners, rank_players, Standing};
pub use state::{Difficulty, GameState, Phase, Player, PlayerId, Trick};
pub use tricks::{clear_trick, play_card, PlayOutcome};
