use tracing::debug;

use crate::domain::cards_logic::determine_trick_winner;
use crate::domain::cards_types::{CardId, PlayedCard};
use crate::domain::game_transition::finish_round;
use crate::domain::state::{GameState, Phase, PlayerId, Trick};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether every player has now played to the trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<PlayerId>,
    pub round_ended: bool,
    pub game_ended: bool,
    /// The completed trick stays on the table until `clear_trick` runs.
    pub needs_trick_clear: bool,
}

/// Find the hand position `card_id` refers to. In the blind round the
/// owner only sees placeholders, so `hidden-<index>` addresses a slot.
fn resolve_hand_position(
    state: &GameState,
    who: &str,
    card_id: &CardId,
) -> Result<usize, DomainError> {
    let player = state
        .player(who)
        .ok_or_else(|| DomainError::validation(ValidationKind::UnknownPlayer, "Unknown player"))?;

    if let Some(pos) = player.hand.iter().position(|c| &c.id == card_id) {
        return Ok(pos);
    }
    if state.is_blind_round {
        if let Some(idx) = card_id.hidden_index() {
            if idx < player.hand.len() {
                return Ok(idx);
            }
        }
    }
    Err(DomainError::validation(
        ValidationKind::CardNotInHand,
        format!("Card {card_id} not in hand"),
    ))
}

/// Play a card into the current trick, enforcing phase and turn.
///
/// Any card in hand may be played; there is no obligation to follow suit.
pub fn play_card(
    state: &mut GameState,
    who: &str,
    card_id: &CardId,
    ace_is_high: Option<bool>,
) -> Result<PlayOutcome, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Cards can only be played while playing",
        ));
    }
    if state.current_trick.awaiting_clear() {
        return Err(DomainError::validation(
            ValidationKind::TrickAwaitingClear,
            "Previous trick has not been cleared",
        ));
    }
    if !state.is_current(who) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    if state.current_trick.has_played(who) {
        return Err(DomainError::invariant(format!(
            "{who} is current but already played to this trick"
        )));
    }

    let pos = resolve_hand_position(state, who, card_id)?;
    let card = match state.player_mut(who) {
        Some(player) => player.hand.remove(pos),
        None => return Err(DomainError::invariant("player vanished mid-play")),
    };
    let ace_choice = card.is_ace_of_hearts().then(|| ace_is_high.unwrap_or(true));

    if state.current_trick.is_empty() {
        state.current_trick.lead_suit = Some(card.suit);
    }
    state.current_trick.cards.push(PlayedCard {
        card,
        player_id: who.to_string(),
        ace_is_high: ace_choice,
    });

    if state.current_trick.cards.len() < state.players.len() {
        state.current_player_id = state.next_player_after(who);
        return Ok(PlayOutcome::default());
    }

    let winner_id = determine_trick_winner(&state.current_trick.cards)?
        .player_id
        .clone();
    let winner = state
        .player_mut(&winner_id)
        .ok_or_else(|| DomainError::invariant("trick winner is not seated"))?;
    winner.tricks_won += 1;
    state.current_trick.winner_id = Some(winner_id.clone());
    state.play_order = state.rotation_from(&winner_id);
    state.current_player_id = None;
    debug!(winner = %winner_id, "trick resolved");

    let mut outcome = PlayOutcome {
        trick_completed: true,
        trick_winner: Some(winner_id.clone()),
        ..PlayOutcome::default()
    };

    if state.all_hands_empty() {
        outcome.game_ended = finish_round(state, winner_id);
        outcome.round_ended = true;
    } else {
        outcome.needs_trick_clear = true;
    }
    Ok(outcome)
}

/// Take the resolved trick off the table and hand the lead to its winner.
pub fn clear_trick(state: &mut GameState) -> Result<PlayerId, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "No trick to clear outside of play",
        ));
    }
    let Some(winner) = state.current_trick.winner_id.clone() else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Current trick is not complete",
        ));
    };
    state.current_trick = Trick::default();
    state.current_player_id = Some(winner.clone());
    Ok(winner)
}
