use std::sync::Arc;

use bisca::ws::protocol::ServerMsg;
use bisca::ws::room::{JoinError, JoinKind, ViewerSink};
use uuid::Uuid;

use super::test_room;
use crate::support::viewer::{seat_all, RecordingSink, Viewer};

#[test]
fn first_player_becomes_host_and_others_are_told() {
    let room = test_room(10);
    let alice = Viewer::new("alice");
    assert_eq!(alice.join(&room).unwrap(), JoinKind::New);

    match alice.sink.take().as_slice() {
        [ServerMsg::RoomState {
            players,
            game_state,
            is_host,
        }] => {
            assert_eq!(players.len(), 1);
            assert!(players[0].is_host);
            assert!(game_state.is_none());
            assert!(*is_host);
        }
        other => panic!("unexpected frames {other:?}"),
    }

    let bob = Viewer::new("bob");
    bob.join(&room).unwrap();
    match bob.sink.take().as_slice() {
        [ServerMsg::RoomState {
            players, is_host, ..
        }] => {
            assert_eq!(players.len(), 2);
            assert_eq!(players[1].seat_index, 1);
            assert!(!*is_host);
        }
        other => panic!("unexpected frames {other:?}"),
    }

    match alice.sink.take().as_slice() {
        [ServerMsg::PlayerJoined { player }] => assert_eq!(player.id, "bob"),
        other => panic!("unexpected frames {other:?}"),
    }
}

#[test]
fn full_room_rejects_newcomers() {
    let room = test_room(2);
    seat_all(&room, &["a", "b"]);

    let err = Viewer::new("c").join(&room).unwrap_err();
    assert_eq!(err, JoinError::RoomFull { max: 2 });
    assert_eq!(err.to_string(), "Room is full (max 2 players)");
    assert_eq!(room.summary().players.len(), 2);
}

#[test]
fn started_game_rejects_newcomers() {
    let room = test_room(10);
    seat_all(&room, &["a", "b"]);
    assert!(room.start_game("a"));

    let err = Viewer::new("c").join(&room).unwrap_err();
    assert_eq!(err, JoinError::GameStarted);
    assert_eq!(err.to_string(), "Game already started");
}

#[test]
fn blank_identity_is_rejected() {
    let room = test_room(10);
    let sink: Arc<dyn ViewerSink> = Arc::new(RecordingSink::default());

    let err = room
        .join(Uuid::new_v4(), Arc::clone(&sink), "p1", "   ")
        .unwrap_err();
    assert!(matches!(err, JoinError::Invalid(_)));

    let err = room.join(Uuid::new_v4(), sink, "", "Nick").unwrap_err();
    assert!(matches!(err, JoinError::Invalid(_)));
    assert!(room.summary().players.is_empty());
}

#[test]
fn lobby_disconnect_notifies_the_others() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b"]);
    viewers[0].sink.take();

    room.disconnect(viewers[1].conn_id);

    match viewers[0].sink.take().as_slice() {
        [ServerMsg::PlayerDisconnected { player_id }] => assert_eq!(player_id, "b"),
        other => panic!("unexpected frames {other:?}"),
    }
    let summary = room.summary();
    assert_eq!(summary.players.len(), 2, "seat is kept");
    assert!(!summary.players[1].connected);
}

#[test]
fn reconnect_mid_game_restores_the_seat() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b"]);
    assert!(room.start_game("a"));

    room.disconnect(viewers[0].conn_id);
    let seen_by_b = viewers[1].sink.last_game_state().unwrap();
    assert!(!seen_by_b.player("a").unwrap().connected);

    let again = Viewer::new("a");
    assert_eq!(again.join(&room).unwrap(), JoinKind::Reconnected);

    let frames = again.sink.take();
    match frames.first() {
        Some(ServerMsg::RoomState {
            game_state: Some(game),
            is_host,
            ..
        }) => {
            assert!(*is_host);
            assert!(game.player("a").unwrap().hand.iter().all(|c| !c.is_hidden()));
        }
        other => panic!("expected room_state first, got {other:?}"),
    }
    assert!(frames
        .iter()
        .any(|f| matches!(f, ServerMsg::GameState { .. })));

    let game = room.game_state().unwrap();
    assert!(game.player("a").unwrap().connected);
    assert!(viewers[1].sink.last_game_state().unwrap().player("a").unwrap().connected);
}

#[test]
fn closing_a_stale_socket_keeps_a_reconnected_player_online() {
    let room = test_room(10);
    let first = Viewer::new("a");
    first.join(&room).unwrap();

    let second = Viewer::new("a");
    assert_eq!(second.join(&room).unwrap(), JoinKind::Reconnected);
    assert_eq!(room.connection_count(), 2);

    room.disconnect(first.conn_id);
    assert_eq!(room.connection_count(), 1);
    assert!(room.summary().players[0].connected);

    room.disconnect(second.conn_id);
    assert!(!room.summary().players[0].connected);
}

#[test]
fn register_player_rebinds_which_state_a_socket_receives() {
    let room = test_room(10);
    let viewers = seat_all(&room, &["a", "b"]);
    room.register_player(viewers[1].conn_id, "a");
    assert!(room.start_game("a"));

    let seen = viewers[1].sink.last_game_state().unwrap();
    assert!(seen.player("a").unwrap().hand.iter().all(|c| !c.is_hidden()));
    assert!(seen.player("b").unwrap().hand.iter().all(|c| c.is_hidden()));
}
