use super::Feed;
use pit_gameroom::Room;
use tokio::sync::Mutex;

/// One live room plus its subscriber feed.
///
/// The mutex is the room's whole concurrency story: every action, and the
/// broadcast that follows it, happens under this lock, so subscribers
/// observe snapshots in the exact order the room mutated. Rooms are small
/// and actions are cheap; contention is per-table, not per-lobby.
pub struct RoomHandle {
    pub(crate) room: Mutex<Room>,
    pub(crate) feed: Feed,
}

impl RoomHandle {
    pub fn new(room: Room) -> Self {
        Self {
            room: Mutex::new(room),
            feed: Feed::new(),
        }
    }
}
