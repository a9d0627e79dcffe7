// In-process viewer that records what a room sends it

use std::sync::Arc;

use bisca::domain::GameState;
use bisca::ws::protocol::ServerMsg;
use bisca::ws::room::{Room, ViewerSink};
use parking_lot::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<ServerMsg>>,
}

impl ViewerSink for RecordingSink {
    fn send(&self, msg: ServerMsg) -> bool {
        self.frames.lock().push(msg);
        true
    }
}

impl RecordingSink {
    pub fn take(&self) -> Vec<ServerMsg> {
        std::mem::take(&mut *self.frames.lock())
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// The most recent `game_state` frame, if any.
    pub fn last_game_state(&self) -> Option<GameState> {
        self.frames.lock().iter().rev().find_map(|msg| match msg {
            ServerMsg::GameState { game_state } => Some(game_state.clone()),
            _ => None,
        })
    }
}

/// A seated player as a room sees it: one connection and its inbox.
pub struct Viewer {
    pub conn_id: Uuid,
    pub player_id: String,
    pub sink: Arc<RecordingSink>,
}

impl Viewer {
    pub fn new(player_id: &str) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            sink: Arc::new(RecordingSink::default()),
        }
    }

    pub fn join(&self, room: &Room) -> Result<bisca::ws::room::JoinKind, bisca::ws::room::JoinError> {
        let sink: Arc<dyn ViewerSink> = self.sink.clone();
        room.join(self.conn_id, sink, &self.player_id, &self.player_id.to_uppercase())
    }
}

/// Seat `ids` in order; the first becomes host.
pub fn seat_all(room: &Room, ids: &[&str]) -> Vec<Viewer> {
    ids.iter()
        .map(|id| {
            let viewer = Viewer::new(id);
            viewer.join(room).expect("join should succeed");
            viewer
        })
        .collect()
}
