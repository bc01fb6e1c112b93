use pit_core::ID;
use pit_gameroom::Protocol;
use pit_gameroom::Room;
use pit_gameroom::User;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// One room's subscriber list.
///
/// Holds the outgoing half of each subscriber's channel; the transport
/// owns the receiving half. Every broadcast renders the room once per
/// subscriber because snapshots are viewer-aware — the bank's hole card
/// goes only to the bank. A send on a closed channel just drops the
/// subscriber; disconnects need no bookkeeping of their own.
#[derive(Debug, Default)]
pub struct Feed {
    subscribers: Mutex<HashMap<ID<User>, UnboundedSender<String>>>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers a subscriber, replacing any previous channel for the
    /// same user (a reconnect).
    pub async fn subscribe(&self, user: ID<User>) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.lock().await.insert(user, tx);
        rx
    }
    pub async fn unsubscribe(&self, user: ID<User>) {
        self.subscribers.lock().await.remove(&user);
    }
    /// Pushes a full snapshot of `room` to every live subscriber.
    pub async fn broadcast(&self, room: &Room) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.retain(|user, tx| {
            tx.send(Protocol::success(room.snapshot(Some(*user)))).is_ok()
        });
        log::debug!(
            "[feed] pushed snapshot to {} subscriber(s)",
            subscribers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pit_core::Unique;

    #[tokio::test]
    async fn dropped_receivers_fall_off_the_list() {
        let feed = Feed::new();
        let alice = User::new("alice");
        let bob = User::new("bob");
        let mut rx = feed.subscribe(alice.id()).await;
        let gone = feed.subscribe(bob.id()).await;
        drop(gone);
        let room = Room::new(ID::default(), "t", 1000, None, 2, false, alice.clone());
        feed.broadcast(&room).await;
        assert_eq!(feed.subscribers.lock().await.len(), 1);
        let push = rx.recv().await.unwrap();
        assert!(push.contains(r#""status":"success""#));
        assert!(push.contains("WAITING"));
    }

    #[tokio::test]
    async fn resubscribe_replaces_the_channel() {
        let feed = Feed::new();
        let alice = User::new("alice");
        let mut stale = feed.subscribe(alice.id()).await;
        let mut fresh = feed.subscribe(alice.id()).await;
        let room = Room::new(ID::default(), "t", 1000, None, 2, false, alice.clone());
        feed.broadcast(&room).await;
        assert!(fresh.try_recv().is_ok());
        assert!(stale.try_recv().is_err());
    }
}
