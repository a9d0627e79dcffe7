mod game_tests;
mod join_tests;

use std::sync::Arc;
use std::time::Duration;

use bisca::ws::room::{Room, RoomSettings};

pub const CLEAR_DELAY: Duration = Duration::from_millis(5);

pub fn test_room(max_players: usize) -> Arc<Room> {
    Arc::new(Room::new(
        backend_test_support::unique_helpers::unique_room_code(),
        RoomSettings {
            max_players,
            trick_clear_delay: CLEAR_DELAY,
            admin_trick_clear_delay: CLEAR_DELAY,
        },
    ))
}
