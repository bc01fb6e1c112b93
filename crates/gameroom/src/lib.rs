//! Authoritative state machine for multiplayer blackjack rooms.
//!
//! A [`Room`] owns its seats, the dealer hand, and the shoe, and walks the
//! WAITING → BETTING → PLAYING → FINISHED cycle one client action at a
//! time. No background timer ever advances a room; every transition is an
//! explicit action, which keeps the machine deterministic and testable.
//!
//! ## Architecture
//!
//! - [`Room`] — the aggregate: seats, dealer hand, turn order, settlement
//! - [`Seat`] — one player slot with its own hand, bet, and status
//! - [`SoloTable`] — single hand against the house, no seat/turn layer
//! - [`Ledger`] — external balance collaborator (debit/credit/balance)
//! - [`Protocol`] — wire envelope and client action parsing
//!
//! ## Snapshots
//!
//! After every mutation the hosting layer serializes a full
//! [`RoomSnapshot`] per subscriber. Snapshots are viewer-aware: the
//! dealer's second card stays hidden from everyone but its owner until
//! dealer resolution begins.
mod error;
mod ledger;
mod message;
mod protocol;
mod room;
mod rotation;
mod seat;
mod solo;
mod user;

pub use error::*;
pub use ledger::*;
pub use message::*;
pub use protocol::*;
pub use room::*;
pub use seat::*;
pub use solo::*;
pub use user::*;
