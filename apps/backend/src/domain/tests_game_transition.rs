use crate::domain::bidding::place_bet;
use crate::domain::cards_types::{Card, CardId, Suit};
use crate::domain::game_transition::{
    mark_ready, set_connected, skip_round, skip_turn, start_game, SkipOutcome,
};
use crate::domain::player_view::personalize;
use crate::domain::scoring::calculate_round_score;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{bet_all, lobby, play_round, ready_all, started};
use crate::domain::tricks::{clear_trick, play_card};
use crate::errors::domain::ValidationKind;

#[test]
fn start_requires_two_players() {
    let mut state = lobby(1);
    let err = start_game(&mut state, &mut rand::rng()).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::NotEnoughPlayers));
    assert_eq!(state.phase, Phase::Waiting);
}

#[test]
fn start_deals_the_first_round() {
    let (state, _) = started(3, 7);
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.cards_per_player, 5);
    assert!(!state.is_blind_round);
    assert_eq!(state.current_player_id.as_deref(), Some("p0"));
    assert_eq!(state.round_leader_id.as_deref(), Some("p0"));
    assert_eq!(state.play_order, vec!["p0", "p1", "p2"]);
    assert!(state.players.iter().all(|p| p.hand.len() == 5 && p.bet.is_none()));
}

#[test]
fn start_twice_is_rejected() {
    let (mut state, mut rng) = started(2, 1);
    let err = start_game(&mut state, &mut rng).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn betting_rotates_then_hands_play_to_the_leader() {
    let (mut state, _) = started(3, 7);
    let out = place_bet(&mut state, "p0", 1).unwrap();
    assert!(!out.bidding_complete);
    assert_eq!(out.next_player.as_deref(), Some("p1"));
    place_bet(&mut state, "p1", 1).unwrap();
    let out = place_bet(&mut state, "p2", 0).unwrap();
    assert!(out.bidding_complete);
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.current_player_id.as_deref(), Some("p0"));
    assert_eq!(state.total_bets, 2);
}

#[test]
fn out_of_turn_bet_changes_nothing() {
    let (mut state, _) = started(3, 7);
    let before = state.clone();
    let err = place_bet(&mut state, "p1", 1).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state, before);
}

#[test]
fn last_bidder_cannot_complete_the_sum() {
    let (mut state, _) = started(2, 3);
    place_bet(&mut state, "p0", 2).unwrap();
    let err = place_bet(&mut state, "p1", 3).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidBet));
    assert_eq!(state.player("p1").unwrap().bet, None);
    place_bet(&mut state, "p1", 4).unwrap();
    assert_eq!(state.phase, Phase::Playing);
}

#[test]
fn completed_trick_blocks_play_until_cleared() {
    let (mut state, _) = started(2, 11);
    bet_all(&mut state);

    let c0 = state.player("p0").unwrap().hand[0].id.clone();
    let first = play_card(&mut state, "p0", &c0, None).unwrap();
    assert!(!first.trick_completed);
    assert_eq!(state.current_trick.lead_suit, Some(state.current_trick.cards[0].card.suit));
    assert_eq!(state.current_player_id.as_deref(), Some("p1"));

    let c1 = state.player("p1").unwrap().hand[0].id.clone();
    let second = play_card(&mut state, "p1", &c1, None).unwrap();
    assert!(second.trick_completed);
    assert!(second.needs_trick_clear);
    assert!(!second.round_ended);
    let winner = second.trick_winner.clone().unwrap();
    assert_eq!(state.current_player_id, None);
    assert_eq!(state.player(&winner).unwrap().tricks_won, 1);
    assert_eq!(state.play_order[0], winner);

    let next = state.player(&winner).unwrap().hand[0].id.clone();
    let err = play_card(&mut state, &winner, &next, None).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::TrickAwaitingClear));

    assert_eq!(clear_trick(&mut state).unwrap(), winner);
    assert!(state.current_trick.is_empty());
    assert_eq!(state.current_player_id.as_deref(), Some(winner.as_str()));
    assert_eq!(
        clear_trick(&mut state).unwrap_err().kind(),
        Some(&ValidationKind::PhaseMismatch)
    );
}

#[test]
fn repeated_play_from_the_same_actor_applies_once() {
    let (mut state, _) = started(3, 5);
    bet_all(&mut state);
    let hand = state.player("p0").unwrap().hand.clone();

    play_card(&mut state, "p0", &hand[0].id, None).unwrap();
    let err = play_card(&mut state, "p0", &hand[1].id, None).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));

    assert_eq!(state.player("p0").unwrap().hand.len(), 4);
    assert_eq!(state.current_trick.cards.len(), 1);
}

#[test]
fn unknown_card_is_rejected() {
    let (mut state, _) = started(2, 5);
    bet_all(&mut state);
    let err = play_card(&mut state, "p0", &CardId::from("hearts-99-0"), None).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardNotInHand));
    // Placeholders only address cards in the blind round.
    let err = play_card(&mut state, "p0", &CardId::hidden(0), None).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardNotInHand));
}

#[test]
fn ace_of_hearts_defaults_high() {
    let (mut state, _) = started(2, 5);
    bet_all(&mut state);
    state.players[0].hand = vec![Card::new(Suit::Hearts, 1, 0)];
    state.players[1].hand = vec![Card::new(Suit::Hearts, 13, 0)];

    play_card(&mut state, "p0", &CardId::from("hearts-1-0"), None).unwrap();
    assert_eq!(state.current_trick.cards[0].ace_is_high, Some(true));
    let out = play_card(&mut state, "p1", &CardId::from("hearts-13-0"), None).unwrap();
    assert_eq!(out.trick_winner.as_deref(), Some("p0"));
    assert!(out.round_ended);
}

#[test]
fn round_end_scores_and_waits_for_everyone() {
    let (mut state, mut rng) = started(3, 21);
    play_round(&mut state);

    assert_eq!(state.phase, Phase::RoundEnd);
    assert!(state.last_round_winner_id.is_some());
    assert_eq!(state.current_player_id, None);
    for p in &state.players {
        assert_eq!(p.score, calculate_round_score(p.bet.unwrap(), p.tricks_won));
    }
    let total_tricks: u32 = state.players.iter().map(|p| p.tricks_won as u32).sum();
    assert_eq!(total_tricks, 5);

    let winner = state.last_round_winner_id.clone().unwrap();
    assert!(!mark_ready(&mut state, "p0", &mut rng).unwrap().round_started);
    let err = mark_ready(&mut state, "p0", &mut rng).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::AlreadyReady));
    assert_eq!(state.ready_for_next_round, vec!["p0"]);

    mark_ready(&mut state, "p1", &mut rng).unwrap();
    let out = mark_ready(&mut state, "p2", &mut rng).unwrap();
    assert!(out.round_started);
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.cards_per_player, 4);
    assert!(state.ready_for_next_round.is_empty());
    assert_eq!(state.current_player_id.as_ref(), Some(&winner));
    assert_eq!(state.round_leader_id.as_ref(), Some(&winner));
    assert!(state.players.iter().all(|p| p.tricks_won == 0 && p.bet.is_none()));
}

#[test]
fn ready_outside_round_end_is_rejected() {
    let (mut state, mut rng) = started(2, 2);
    let err = mark_ready(&mut state, "p0", &mut rng).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn blind_round_accepts_placeholder_ids() {
    let (mut state, mut rng) = started(3, 9);
    for _ in 0..4 {
        play_round(&mut state);
        ready_all(&mut state, &mut rng);
    }
    assert_eq!(state.current_round, 4);
    assert!(state.is_blind_round);
    bet_all(&mut state);

    let who = state.current_player_id.clone().unwrap();
    let view = personalize(&state, &who);
    let own = &view.player(&who).unwrap().hand;
    assert_eq!(own.len(), 1);
    assert!(own[0].is_hidden());

    let real = state.player(&who).unwrap().hand[0].id.clone();
    play_card(&mut state, &who, &own[0].id, Some(false)).unwrap();
    assert_eq!(state.current_trick.cards[0].card.id, real);
    assert!(state.player(&who).unwrap().hand.is_empty());
}

#[test]
fn skip_turn_bets_zero_for_the_current_player() {
    let (mut state, _) = started(3, 4);
    place_bet(&mut state, "p0", 3).unwrap();
    match skip_turn(&mut state).unwrap() {
        SkipOutcome::Bet { player_id, bet, .. } => {
            assert_eq!(player_id, "p1");
            assert_eq!(bet, 0);
        }
        other => panic!("expected a bet, got {other:?}"),
    }
    assert_eq!(state.current_player_id.as_deref(), Some("p2"));
    assert_eq!(state.total_bets, 3);
}

#[test]
fn skip_turn_plays_the_first_card() {
    let (mut state, _) = started(2, 4);
    bet_all(&mut state);
    let first = state.player("p0").unwrap().hand[0].clone();
    match skip_turn(&mut state).unwrap() {
        SkipOutcome::Play { player_id, .. } => assert_eq!(player_id, "p0"),
        other => panic!("expected a play, got {other:?}"),
    }
    assert_eq!(state.current_trick.cards[0].card, first);
}

#[test]
fn skip_round_scores_only_bettors() {
    let (mut state, _) = started(3, 4);
    place_bet(&mut state, "p0", 1).unwrap();
    let game_over = skip_round(&mut state).unwrap();
    assert!(!game_over);
    assert_eq!(state.phase, Phase::RoundEnd);
    assert_eq!(state.player("p0").unwrap().score, -1);
    assert_eq!(state.player("p1").unwrap().score, 0);
    assert_eq!(state.player("p2").unwrap().score, 0);
    assert_eq!(state.last_round_winner_id.as_deref(), Some("p1"));

    assert!(skip_round(&mut state).is_err());
}

#[test]
fn set_connected_flags_the_player() {
    let (mut state, _) = started(2, 4);
    set_connected(&mut state, "p1", false).unwrap();
    assert!(!state.player("p1").unwrap().connected);
    let err = set_connected(&mut state, "ghost", false).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::UnknownPlayer));
}
