use super::RoomHandle;
use pit_core::Chips;
use pit_core::ID;
use pit_core::Position;
use pit_core::Unique;
use pit_gameroom::Command;
use pit_gameroom::Ledger;
use pit_gameroom::Protocol;
use pit_gameroom::Room;
use pit_gameroom::RoomError;
use pit_gameroom::RoomStatus;
use pit_gameroom::RoomSummary;
use pit_gameroom::SoloTable;
use pit_gameroom::User;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;

/// Owns every live table and routes client commands to them.
///
/// One seat per user across the whole lobby: the `seated` index is how a
/// command finds its room without the client naming it, and it survives
/// disconnects — a user who drops and reconnects is still at their seat.
/// Rooms disappear when their last occupant leaves.
pub struct Lobby {
    ledger: Arc<dyn Ledger>,
    rooms: RwLock<HashMap<ID<Room>, Arc<RoomHandle>>>,
    seated: RwLock<HashMap<ID<User>, ID<Room>>>,
    solos: RwLock<HashMap<ID<User>, SoloTable>>,
}

impl Lobby {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            rooms: RwLock::new(HashMap::new()),
            seated: RwLock::new(HashMap::new()),
            solos: RwLock::new(HashMap::new()),
        }
    }
    /// Opens a room and seats the creator at seat 1.
    pub async fn open(
        &self,
        name: &str,
        min_bet: Chips,
        max_bet: Option<Chips>,
        max_seats: usize,
        player_dealer: bool,
        owner: User,
    ) -> anyhow::Result<ID<Room>> {
        let mut seated = self.seated.write().await;
        if seated.contains_key(&owner.id()) {
            anyhow::bail!(RoomError::AlreadyInRoom);
        }
        let id = ID::default();
        let room = Room::new(id, name, min_bet, max_bet, max_seats, player_dealer, owner.clone());
        self.rooms
            .write()
            .await
            .insert(id, Arc::new(RoomHandle::new(room)));
        seated.insert(owner.id(), id);
        log::info!("[lobby] opened room {}", id);
        Ok(id)
    }
    /// Seats a user in an existing room.
    pub async fn join(&self, id: ID<Room>, user: User) -> anyhow::Result<Position> {
        let mut seated = self.seated.write().await;
        if seated.contains_key(&user.id()) {
            anyhow::bail!(RoomError::AlreadyInRoom);
        }
        let handle = self.handle(id).await?;
        let mut room = handle.room.lock().await;
        let position = room.join(user.clone())?;
        seated.insert(user.id(), id);
        handle.feed.broadcast(&room).await;
        Ok(position)
    }
    /// Opens a push channel for the user's current room.
    pub async fn subscribe(&self, user: ID<User>) -> anyhow::Result<UnboundedReceiver<String>> {
        let id = self
            .my_room(user)
            .await
            .ok_or_else(|| anyhow::anyhow!(RoomError::NotSeated))?;
        let handle = self.handle(id).await?;
        Ok(handle.feed.subscribe(user).await)
    }
    /// The room this user is seated in, if any. Survives disconnects.
    pub async fn my_room(&self, user: ID<User>) -> Option<ID<Room>> {
        self.seated.read().await.get(&user).copied()
    }
    /// Lobby listing: rooms still taking wagers. Mid-round tables are
    /// joinable by id but stay off the listing until they reset.
    pub async fn rooms(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;
        let mut summaries = Vec::with_capacity(rooms.len());
        for handle in rooms.values() {
            let room = handle.room.lock().await;
            if matches!(room.status(), RoomStatus::Waiting | RoomStatus::Betting) {
                summaries.push(room.summary());
            }
        }
        summaries
    }
    /// Applies one wire command against the caller's room and answers with
    /// an envelope. Mutations broadcast a fresh snapshot to every
    /// subscriber before the reply goes back.
    pub async fn command(&self, user: ID<User>, line: &str) -> String {
        let command = match Protocol::decode(line) {
            Ok(command) => command,
            Err(e) => return Protocol::failure(&e.to_string()),
        };
        if command == Command::Leave {
            return match self.depart(user).await {
                Ok(()) => Protocol::success(serde_json::json!({})),
                Err(e) => Protocol::failure(&e.to_string()),
            };
        }
        let Some(id) = self.my_room(user).await else {
            return Protocol::failure(&RoomError::NotSeated.to_string());
        };
        let Ok(handle) = self.handle(id).await else {
            return Protocol::failure("room not found");
        };
        let mut room = handle.room.lock().await;
        let ledger = self.ledger.as_ref();
        let result = match command {
            Command::Bet(amount) => room.bet(user, amount, ledger).await,
            Command::Play(action) => room.act(user, action, ledger).await,
            Command::Start => room.start_round(user, ledger).await,
            Command::Reset => room.reset(user),
            Command::State => return Protocol::success(room.snapshot(Some(user))),
            Command::Leave => unreachable!("handled above"),
        };
        match result {
            Ok(()) => {
                handle.feed.broadcast(&room).await;
                Protocol::success(room.snapshot(Some(user)))
            }
            Err(e) => Protocol::failure(&e.to_string()),
        }
    }
    /// Unseats the user; the room is torn down when its last seat empties.
    pub async fn depart(&self, user: ID<User>) -> anyhow::Result<()> {
        let id = self
            .my_room(user)
            .await
            .ok_or_else(|| anyhow::anyhow!(RoomError::NotSeated))?;
        let handle = self.handle(id).await?;
        let empty = {
            let mut room = handle.room.lock().await;
            room.leave(user, self.ledger.as_ref()).await?;
            handle.feed.unsubscribe(user).await;
            if room.occupied() == 0 {
                true
            } else {
                handle.feed.broadcast(&room).await;
                false
            }
        };
        self.seated.write().await.remove(&user);
        if empty {
            self.rooms.write().await.remove(&id);
            log::info!("[lobby] closed empty room {}", id);
        }
        Ok(())
    }
    async fn handle(&self, id: ID<Room>) -> anyhow::Result<Arc<RoomHandle>> {
        self.rooms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }
}

impl Lobby {
    /// Deals a fresh solo table for the user, replacing a settled one.
    pub async fn solo_deal(&self, user: ID<User>, bet: Chips) -> String {
        let mut solos = self.solos.write().await;
        if solos.get(&user).is_some_and(|t| !t.finished()) {
            return Protocol::failure("hand in progress");
        }
        match SoloTable::deal(ID::default(), user, bet, self.ledger.as_ref()).await {
            Ok(table) => {
                let snapshot = table.snapshot();
                solos.insert(user, table);
                Protocol::success(snapshot)
            }
            Err(e) => Protocol::failure(&e.to_string()),
        }
    }
    /// Applies a hit/stand/double/state command to the user's solo table.
    pub async fn solo_command(&self, user: ID<User>, line: &str) -> String {
        let command = match Protocol::decode(line) {
            Ok(command) => command,
            Err(e) => return Protocol::failure(&e.to_string()),
        };
        let mut solos = self.solos.write().await;
        let Some(table) = solos.get_mut(&user) else {
            return Protocol::failure("no solo table");
        };
        let ledger = self.ledger.as_ref();
        let result = match command {
            Command::Play(action) => table.act(action, ledger).await,
            Command::State => Ok(()),
            _ => return Protocol::failure("not a solo action"),
        };
        match result {
            Ok(()) => Protocol::success(table.snapshot()),
            Err(e) => Protocol::failure(&e.to_string()),
        }
    }
}
