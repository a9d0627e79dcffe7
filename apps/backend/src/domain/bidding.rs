use tracing::debug;

use crate::domain::rules::bet_range;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a bet, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetOutcome {
    /// Every player has now bet; the round moved to `Playing`.
    pub bidding_complete: bool,
    pub next_player: Option<PlayerId>,
}

/// The single value that would make the bets add up to the cards dealt.
pub fn forbidden_bet(cards_per_player: u8, total_bets: u16) -> Option<u8> {
    let remaining = (cards_per_player as u16).checked_sub(total_bets)?;
    u8::try_from(remaining).ok()
}

pub fn is_legal_bet(cards_per_player: u8, total_bets: u16, bet: u8) -> bool {
    bet_range(cards_per_player).contains(&bet)
        && forbidden_bet(cards_per_player, total_bets) != Some(bet)
}

/// All legal bets, ascending.
pub fn available_bets(cards_per_player: u8, total_bets: u16) -> Vec<u8> {
    bet_range(cards_per_player)
        .filter(|&b| is_legal_bet(cards_per_player, total_bets, b))
        .collect()
}

pub fn validate_bet(cards_per_player: u8, total_bets: u16, bet: u8) -> Result<(), DomainError> {
    if !bet_range(cards_per_player).contains(&bet) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBet,
            format!("Bet must be between 0 and {cards_per_player}"),
        ));
    }
    if forbidden_bet(cards_per_player, total_bets) == Some(bet) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBet,
            format!("Total bets cannot equal {cards_per_player}; {bet} is not allowed"),
        ));
    }
    Ok(())
}

/// Place a bet for `who`, enforcing phase, turn and the sum rule.
pub fn place_bet(state: &mut GameState, who: &str, bet: u8) -> Result<BetOutcome, DomainError> {
    if state.phase != Phase::Betting {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Bets are only accepted while betting",
        ));
    }
    if !state.is_current(who) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Out of turn",
        ));
    }
    validate_bet(state.cards_per_player, state.total_bets, bet)?;

    let player = state
        .player_mut(who)
        .ok_or_else(|| DomainError::invariant(format!("current player {who} is not seated")))?;
    if player.bet.is_some() {
        return Err(DomainError::invariant(format!(
            "current player {who} already has a bet"
        )));
    }
    player.bet = Some(bet);
    state.total_bets += bet as u16;

    if state.all_bets_placed() {
        state.phase = Phase::Playing;
        state.current_player_id = state.round_leader_id.clone();
        debug!(total_bets = state.total_bets, "bidding complete");
        return Ok(BetOutcome {
            bidding_complete: true,
            next_player: state.current_player_id.clone(),
        });
    }

    state.current_player_id = state.next_player_after(who);
    Ok(BetOutcome {
        bidding_complete: false,
        next_player: state.current_player_id.clone(),
    })
}
