//! Room hosting: the registry that owns every live table and pushes
//! state to subscribers.
//!
//! The [`Lobby`] is the front door — transports hand it a user and a
//! command line, and it finds the room, applies the action under that
//! room's lock, and broadcasts a fresh per-viewer snapshot to every
//! subscriber. The engine crates below this one never see a channel.
mod feed;
mod handle;
mod lobby;

pub use feed::*;
pub use handle::*;
pub use lobby::*;
