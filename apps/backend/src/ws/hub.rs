use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::info;

use crate::ws::room::{Room, RoomSettings};

/// Process-wide rooms keyed by code.
///
/// Rooms are created on first join. Nothing removes them except
/// `evict_idle`, so without a sweep they live as long as the process.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
    settings: RoomSettings,
}

impl RoomRegistry {
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            rooms: DashMap::new(),
            settings,
        }
    }

    pub fn get_or_create(&self, code: &str) -> Arc<Room> {
        let entry = self.rooms.entry(code.to_string()).or_insert_with(|| {
            info!(room_code = code, "[ROOM] created");
            Arc::new(Room::new(code, self.settings.clone()))
        });
        Arc::clone(&entry)
    }

    pub fn get(&self, code: &str) -> Option<Arc<Room>> {
        self.rooms.get(code).map(|room| Arc::clone(&room))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Drop rooms with no sockets that have been quiet for `max_idle`.
    /// Returns how many were removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.rooms.len();
        self.rooms.retain(|_, room| !room.is_idle(max_idle));
        let evicted = before.saturating_sub(self.rooms.len());
        if evicted > 0 {
            info!(evicted, remaining = self.rooms.len(), "[ROOM] evicted idle rooms");
        }
        evicted
    }

    /// Sweep idle rooms periodically for as long as the registry lives.
    pub fn spawn_eviction(self: &Arc<Self>, max_idle: Duration) -> tokio::task::JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let period = (max_idle / 2).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let Some(registry) = weak.upgrade() else {
                    break;
                };
                registry.evict_idle(max_idle);
            }
        })
    }
}
