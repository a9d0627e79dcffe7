//! Round-level transitions: starting the game, dealing rounds, ending
//! rounds, the ready gate and the host-only shortcuts.

use rand::Rng;
use tracing::debug;

use crate::domain::bidding::{available_bets, is_legal_bet, place_bet, BetOutcome};
use crate::domain::dealing::deal_hands;
use crate::domain::rules::{cards_for_round, is_blind_round, is_last_round, MIN_PLAYERS};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::state::{GameState, Phase, PlayerId, Trick};
use crate::domain::tricks::{play_card, PlayOutcome};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyOutcome {
    /// Everyone was ready and the next round has been dealt.
    pub round_started: bool,
}

/// What a forced `skip_turn` applied on the current player's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipOutcome {
    Bet { player_id: PlayerId, bet: u8, outcome: BetOutcome },
    Play { player_id: PlayerId, outcome: PlayOutcome },
}

pub fn start_game<R: Rng>(state: &mut GameState, rng: &mut R) -> Result<(), DomainError> {
    if state.phase != Phase::Waiting {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Game already started",
        ));
    }
    if state.players.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("At least {MIN_PLAYERS} players are needed to start"),
        ));
    }
    for player in &mut state.players {
        player.score = 0;
    }
    state.current_round = 0;
    state.last_round_winner_id = None;
    let leader = state.players[0].id.clone();
    start_round(state, leader, rng)
}

/// Deal the round at `state.current_round` and hand the first action to `leader`.
fn start_round<R: Rng>(
    state: &mut GameState,
    leader: PlayerId,
    rng: &mut R,
) -> Result<(), DomainError> {
    let cards = cards_for_round(state.current_round).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidRound,
            format!("Round index {} is past the schedule", state.current_round),
        )
    })?;
    let hands = deal_hands(state.players.len(), cards, rng)?;
    state.deal_round(hands);

    state.phase = Phase::Betting;
    state.cards_per_player = cards;
    state.is_blind_round = is_blind_round(cards);
    state.current_trick = Trick::default();
    state.total_bets = 0;
    state.ready_for_next_round.clear();
    state.play_order = state.rotation_from(&leader);
    state.round_leader_id = Some(leader.clone());
    state.current_player_id = Some(leader);
    debug!(
        round = state.current_round,
        cards_per_player = cards,
        "round dealt"
    );
    Ok(())
}

/// Score the round and move to `RoundEnd`, or `GameEnd` after the last
/// round. `next_leader` leads the following round. Returns whether the
/// game is over.
pub(crate) fn finish_round(state: &mut GameState, next_leader: PlayerId) -> bool {
    apply_round_scoring(state);
    state.current_trick = Trick::default();
    state.current_player_id = None;
    state.ready_for_next_round.clear();
    state.last_round_winner_id = Some(next_leader);

    if is_last_round(state.current_round) {
        state.phase = Phase::GameEnd;
        true
    } else {
        state.phase = Phase::RoundEnd;
        false
    }
}

/// Record that `who` is ready. Once everyone is, the next round is dealt.
pub fn mark_ready<R: Rng>(
    state: &mut GameState,
    who: &str,
    rng: &mut R,
) -> Result<ReadyOutcome, DomainError> {
    if state.phase != Phase::RoundEnd {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Ready is only accepted between rounds",
        ));
    }
    if state.player(who).is_none() {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("Unknown player {who}"),
        ));
    }
    if state.ready_for_next_round.iter().any(|id| id == who) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyReady,
            format!("{who} is already ready"),
        ));
    }
    state.ready_for_next_round.push(who.to_string());

    if !state.everyone_ready() {
        return Ok(ReadyOutcome {
            round_started: false,
        });
    }

    let leader = state
        .last_round_winner_id
        .clone()
        .ok_or_else(|| DomainError::invariant("round ended without a recorded winner"))?;
    state.current_round += 1;
    start_round(state, leader, rng)?;
    Ok(ReadyOutcome {
        round_started: true,
    })
}

/// Act for the current player: bet 0 (or the smallest legal bet when 0 is
/// forbidden), or play the first card in hand with the Ace of Hearts high.
pub fn skip_turn(state: &mut GameState) -> Result<SkipOutcome, DomainError> {
    let who = state.current_player_id.clone().ok_or_else(|| {
        DomainError::validation(ValidationKind::PhaseMismatch, "Nobody is due to act")
    })?;

    match state.phase {
        Phase::Betting => {
            let bet = if is_legal_bet(state.cards_per_player, state.total_bets, 0) {
                0
            } else {
                available_bets(state.cards_per_player, state.total_bets)
                    .first()
                    .copied()
                    .ok_or_else(|| DomainError::invariant("no legal bet exists"))?
            };
            let outcome = place_bet(state, &who, bet)?;
            Ok(SkipOutcome::Bet {
                player_id: who,
                bet,
                outcome,
            })
        }
        Phase::Playing => {
            let card_id = state
                .player(&who)
                .and_then(|p| p.hand.first())
                .map(|c| c.id.clone())
                .ok_or_else(|| DomainError::invariant(format!("{who} is current with no cards")))?;
            let outcome = play_card(state, &who, &card_id, Some(true))?;
            Ok(SkipOutcome::Play {
                player_id: who,
                outcome,
            })
        }
        _ => Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Nothing to skip in this phase",
        )),
    }
}

/// End the round early. Only players who already bet are scored. Returns
/// whether the game is over.
pub fn skip_round(state: &mut GameState) -> Result<bool, DomainError> {
    if !matches!(state.phase, Phase::Betting | Phase::Playing) {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "No round in progress",
        ));
    }
    let leader = state
        .current_player_id
        .clone()
        .or_else(|| state.current_trick.winner_id.clone())
        .or_else(|| state.players.first().map(|p| p.id.clone()))
        .ok_or_else(|| DomainError::invariant("game has no players"))?;
    Ok(finish_round(state, leader))
}

pub fn set_connected(state: &mut GameState, who: &str, connected: bool) -> Result<(), DomainError> {
    let player = state.player_mut(who).ok_or_else(|| {
        DomainError::validation(ValidationKind::UnknownPlayer, format!("Unknown player {who}"))
    })?;
    player.connected = connected;
    Ok(())
}
