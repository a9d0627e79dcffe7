use std::time::Duration;

use backend_test_support::unique_helpers::unique_room_code;
use bisca::state::app_state::AppState;
use serde_json::json;

use super::{connect_and_join, join_msg, WAIT};
use crate::support::test_server::{start_test_server, ws_url};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn join_creates_the_room_and_returns_room_state() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::for_tests();
    let rooms = state.rooms();
    let (server_handle, addr, server_join) = start_test_server(state).await?;
    let code = unique_room_code();

    let (mut alice, room_state) = connect_and_join(&ws_url(addr), &code, "alice").await?;
    assert_eq!(room_state["isHost"], true);
    assert_eq!(room_state["gameState"], serde_json::Value::Null);
    assert_eq!(room_state["players"][0]["id"], "alice");
    assert_eq!(room_state["players"][0]["seatIndex"], 0);
    assert!(rooms.get(&code).is_some());

    let (mut bob, room_state) = connect_and_join(&ws_url(addr), &code, "bob").await?;
    assert_eq!(room_state["isHost"], false);
    assert_eq!(room_state["players"].as_array().map(Vec::len), Some(2));

    let joined = alice.recv_type("player_joined", WAIT).await?;
    assert_eq!(joined["player"]["id"], "bob");
    assert_eq!(joined["player"]["nickname"], "BOB");

    bob.close().await?;
    let gone = alice.recv_type("player_disconnected", WAIT).await?;
    assert_eq!(gone["playerId"], "bob");

    alice.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn join_errors_are_reported_without_closing() -> Result<(), Box<dyn std::error::Error>> {
    let (server_handle, addr, server_join) = start_test_server(AppState::for_tests()).await?;
    let code = unique_room_code();

    let (mut host, _) = connect_and_join(&ws_url(addr), &code, "host").await?;
    let (mut guest, _) = connect_and_join(&ws_url(addr), &code, "guest").await?;
    host.send_json(&json!({ "type": "start_game" })).await?;
    host.recv_type("game_state", WAIT).await?;

    let mut late = WebSocketClient::connect_retry(&ws_url(addr), Duration::from_secs(1)).await?;
    late.send_json(&join_msg(&code, "late")).await?;
    let err = late.recv_type("join_error", WAIT).await?;
    assert_eq!(err["message"], "Game already started");

    late.send_json(&join_msg("   ", "late")).await?;
    let err = late.recv_type("join_error", WAIT).await?;
    assert_eq!(err["message"], "Room code is required");

    late.close().await?;
    guest.close().await?;
    host.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn malformed_frames_get_an_error_and_close() -> Result<(), Box<dyn std::error::Error>> {
    let (server_handle, addr, server_join) = start_test_server(AppState::for_tests()).await?;

    let mut client = WebSocketClient::connect_retry(&ws_url(addr), Duration::from_secs(1)).await?;
    client.send("{not json").await?;

    let err = client
        .recv_json_timeout(WAIT)
        .await?
        .expect("error frame before close");
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "bad_request");
    assert!(client.recv_json_timeout(WAIT).await?.is_none(), "socket closes");

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn intents_before_joining_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (server_handle, addr, server_join) = start_test_server(AppState::for_tests()).await?;

    let mut client = WebSocketClient::connect_retry(&ws_url(addr), Duration::from_secs(1)).await?;
    client.send_json(&json!({ "type": "start_game" })).await?;
    client.send_json(&json!({ "type": "place_bet", "bet": 1 })).await?;
    client.expect_silence(Duration::from_millis(200)).await;

    let code = unique_room_code();
    client.send_json(&join_msg(&code, "solo")).await?;
    let state = client.recv_type("room_state", WAIT).await?;
    assert_eq!(state["isHost"], true);

    client.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
