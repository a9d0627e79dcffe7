// Picks a legal action for whoever is due to act

use bisca::domain::{available_bets, CardId, GameState, Phase, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Bet(PlayerId, u8),
    Play(PlayerId, CardId, Option<bool>),
}

/// Smallest legal bet, or the first card in hand with the Ace of Hearts
/// high. `None` when nobody is due to act or a trick awaits clearing.
pub fn next_move(state: &GameState) -> Option<Move> {
    let who = state.current_player_id.clone()?;
    match state.phase {
        Phase::Betting => {
            let bet = *available_bets(state.cards_per_player, state.total_bets).first()?;
            Some(Move::Bet(who, bet))
        }
        Phase::Playing if !state.current_trick.awaiting_clear() => {
            let card = state.player(&who)?.hand.first()?.clone();
            let ace = card.is_ace_of_hearts().then_some(true);
            Some(Move::Play(who, card.id, ace))
        }
        _ => None,
    }
}

/// Card counts across hands, the table and nothing else. Used to check
/// that no card is created or lost while a round is played.
pub fn cards_in_play(state: &GameState) -> usize {
    let in_hands: usize = state.players.iter().map(|p| p.hand.len()).sum();
    in_hands + state.current_trick.cards.len()
}
