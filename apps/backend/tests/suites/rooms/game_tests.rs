use std::sync::{Arc, Barrier};
use std::thread;

use bisca::domain::{Phase, ROUND_SCHEDULE};
use bisca::ws::room::Room;

use super::{test_room, CLEAR_DELAY};
use crate::support::game_driver::{cards_in_play, next_move, Move};
use crate::support::viewer::{seat_all, Viewer};

fn apply(room: &Arc<Room>, mv: Move) -> bool {
    match mv {
        Move::Bet(who, bet) => room.place_bet(&who, bet as i32),
        Move::Play(who, card_id, ace) => room.play_card(&who, &card_id, ace),
    }
}

/// Drive the room with legal moves until `stop` holds for the live game.
async fn drive_until(room: &Arc<Room>, ids: &[&str], stop: impl Fn(Phase) -> bool) {
    for _ in 0..2_000 {
        let game = room.game_state().expect("game in progress");
        if stop(game.phase) {
            return;
        }
        match game.phase {
            Phase::RoundEnd => {
                for id in ids {
                    room.player_ready(id);
                }
            }
            _ => match next_move(&game) {
                Some(mv) => assert!(apply(room, mv.clone()), "legal move rejected: {mv:?}"),
                None => tokio::time::sleep(CLEAR_DELAY * 2).await,
            },
        }
    }
    panic!("game did not reach the expected phase");
}

#[tokio::test(start_paused = true)]
async fn only_the_host_can_start() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b", "c"]);

    assert!(!room.start_game("b"));
    assert!(room.game_state().is_none());
    assert!(room.start_game("a"));

    let game = room.game_state().unwrap();
    assert_eq!(game.phase, Phase::Betting);
    assert_eq!(game.cards_per_player, ROUND_SCHEDULE[0]);
    assert!(!room.start_game("a"), "game already running");

    for viewer in &viewers {
        let seen = viewer.sink.last_game_state().unwrap();
        for player in &seen.players {
            assert_eq!(player.hand.len(), ROUND_SCHEDULE[0] as usize);
            let own = player.id == viewer.player_id;
            assert!(player.hand.iter().all(|c| c.is_hidden() != own));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn out_of_turn_and_out_of_range_bets_are_dropped() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b", "c"]);
    room.start_game("a");
    for v in &viewers {
        v.sink.take();
    }

    let game = room.game_state().unwrap();
    let current = game.current_player_id.clone().unwrap();
    let idle = ["a", "b", "c"].into_iter().find(|id| *id != current).unwrap();

    assert!(!room.place_bet(idle, 0));
    assert!(!room.place_bet(&current, -1));
    assert!(!room.place_bet(&current, 300));
    assert!(!room.place_bet(&current, 6));
    assert!(viewers.iter().all(|v| v.sink.len() == 0), "no broadcast for dropped intents");

    assert!(room.place_bet(&current, 1));
    assert!(viewers.iter().all(|v| v.sink.len() == 1));
    assert_eq!(room.game_state().unwrap().total_bets, 1);
}

#[tokio::test(start_paused = true)]
async fn completed_trick_is_cleared_after_the_delay() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b", "c"]);
    room.start_game("a");

    drive_until(&room, &["a", "b", "c"], |phase| phase == Phase::Playing).await;
    let dealt = cards_in_play(&room.game_state().unwrap());

    for _ in 0..3 {
        let mv = next_move(&room.game_state().unwrap()).unwrap();
        assert!(apply(&room, mv));
    }

    let game = room.game_state().unwrap();
    assert!(game.current_trick.awaiting_clear());
    assert_eq!(cards_in_play(&game), dealt);
    let winner = game.current_trick.winner_id.clone().unwrap();

    let hand = &game.player(&winner).unwrap().hand;
    assert!(
        !room.play_card(&winner, &hand[0].id, Some(true)),
        "plays wait for the table to clear"
    );

    tokio::time::sleep(CLEAR_DELAY * 2).await;

    let game = room.game_state().unwrap();
    assert!(game.current_trick.is_empty());
    assert_eq!(game.current_player_id.as_deref(), Some(winner.as_str()));
    for viewer in &viewers {
        assert!(viewer.sink.last_game_state().unwrap().current_trick.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn ready_is_recorded_once_per_player() {
    let room = test_room(10);
    seat_all(&room, &["a", "b"]);
    room.start_game("a");

    drive_until(&room, &[], |phase| phase == Phase::RoundEnd).await;

    assert!(room.player_ready("a"));
    assert!(!room.player_ready("a"));
    assert!(!room.player_ready("stranger"));
    assert_eq!(room.game_state().unwrap().phase, Phase::RoundEnd);

    assert!(room.player_ready("b"));
    let game = room.game_state().unwrap();
    assert_eq!(game.phase, Phase::Betting);
    assert_eq!(game.current_round, 1);
    assert_eq!(game.cards_per_player, ROUND_SCHEDULE[1]);
}

#[tokio::test(start_paused = true)]
async fn full_game_reaches_the_end_and_can_restart() {
    let room = test_room(10);
    let ids = ["a", "b", "c", "d"];
    let viewers = seat_all(&room, &ids);
    room.start_game("a");

    drive_until(&room, &ids, |phase| phase == Phase::GameEnd).await;

    let game = room.game_state().unwrap();
    assert_eq!(game.current_round, ROUND_SCHEDULE.len() - 1);
    for viewer in &viewers {
        assert_eq!(viewer.sink.last_game_state().unwrap().phase, Phase::GameEnd);
    }

    assert!(room.start_game("a"));
    let game = room.game_state().unwrap();
    assert_eq!(game.phase, Phase::Betting);
    assert_eq!(game.current_round, 0);
    assert!(game.players.iter().all(|p| p.score == 0));
}

#[tokio::test(start_paused = true)]
async fn blind_round_placeholders_are_playable() {
    let room = test_room(10);
    let ids = ["a", "b"];
    let viewers = seat_all(&room, &ids);
    room.start_game("a");

    drive_until(&room, &ids, |_| {
        room.game_state().is_some_and(|g| g.is_blind_round && g.phase == Phase::Playing)
    })
    .await;

    let game = room.game_state().unwrap();
    let current = game.current_player_id.clone().unwrap();
    let viewer = viewers.iter().find(|v| v.player_id == current).unwrap();
    let seen = viewer.sink.last_game_state().unwrap();
    let own = &seen.player(&current).unwrap().hand;
    assert_eq!(own.len(), 1);
    assert!(own[0].is_hidden());

    assert!(room.play_card(&current, &own[0].id, None));
    assert!(room.game_state().unwrap().current_trick.has_played(&current));
}

#[test]
fn simultaneous_plays_from_one_player_apply_once() {
    let room = test_room(10);
    let ids = ["a", "b", "c"];
    let _viewers = seat_all(&room, &ids);
    assert!(room.start_game("a"));

    while let Some(Move::Bet(who, bet)) = next_move(&room.game_state().unwrap()) {
        assert!(room.place_bet(&who, bet as i32));
    }
    let before = room.game_state().unwrap();
    assert_eq!(before.phase, Phase::Playing);
    let actor = before.current_player_id.clone().unwrap();
    let hand = before.players.iter().find(|p| p.id == actor).unwrap().hand.clone();
    let hand_len = hand.len();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = hand
        .iter()
        .take(2)
        .map(|card| {
            let room = Arc::clone(&room);
            let barrier = Arc::clone(&barrier);
            let actor = actor.clone();
            let card_id = card.id.clone();
            thread::spawn(move || {
                barrier.wait();
                room.play_card(&actor, &card_id, Some(true))
            })
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(accepted, 1);

    let after = room.game_state().unwrap();
    let hand_after = &after.players.iter().find(|p| p.id == actor).unwrap().hand;
    assert_eq!(hand_after.len(), hand_len - 1);
    assert_eq!(after.current_trick.cards.len(), 1);
}
