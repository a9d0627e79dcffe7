use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::hub::RoomRegistry;
use crate::ws::room::RoomSettings;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Every live room, shared by all workers
    rooms: Arc<RoomRegistry>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let rooms = Arc::new(RoomRegistry::new(RoomSettings::from(&config)));
        Self { rooms, config }
    }

    /// Shared handle to the room registry.
    pub fn rooms(&self) -> Arc<RoomRegistry> {
        Arc::clone(&self.rooms)
    }

    /// Defaults with short trick delays, for tests.
    pub fn for_tests() -> Self {
        Self::new(ServerConfig {
            trick_clear_delay: std::time::Duration::from_millis(20),
            admin_trick_clear_delay: std::time::Duration::from_millis(10),
            ..ServerConfig::default()
        })
    }
}
