use serde::{Deserialize, Serialize};

use crate::domain::{CardId, GameState, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_code: String,
        player_id: PlayerId,
        nickname: String,
    },
    StartGame,
    PlaceBet {
        bet: i32,
    },
    #[serde(rename_all = "camelCase")]
    PlayCard {
        card_id: CardId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ace_is_high: Option<bool>,
    },
    PlayerReady,
    AdminSkip {
        action: AdminAction,
    },
    #[serde(rename_all = "camelCase")]
    RegisterPlayer {
        player_id: PlayerId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    SkipTurn,
    SkipRound,
    ResetGame,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    RoomState {
        players: Vec<Player>,
        game_state: Option<GameState>,
        is_host: bool,
    },

    JoinError {
        message: String,
    },

    AdminError {
        message: String,
    },

    /// Always personalized for the receiving player.
    #[serde(rename_all = "camelCase")]
    GameState {
        game_state: GameState,
    },

    PlayerJoined {
        player: Player,
    },

    #[serde(rename_all = "camelCase")]
    PlayerDisconnected {
        player_id: PlayerId,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
}
