pub mod hub;
pub mod protocol;
pub mod room;
pub mod session;

pub use hub::RoomRegistry;
pub use room::{Room, RoomSettings, RoomSummary, ViewerSink};
