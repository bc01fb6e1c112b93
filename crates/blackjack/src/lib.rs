//! Pure blackjack rules.
//!
//! Everything here is a total function over hands and bets — no IO, no
//! clocks, no randomness. The async room machinery in `pit-gameroom` drives
//! these rules; this crate only answers questions:
//!
//! - [`Hand`] — ordered cards with the ace-soft/hard best total
//! - [`Standing`] — blackjack / bust / open classification
//! - [`Action`] — hit / stand / double and which are legal right now
//! - [`Outcome`] — end-of-round result per seat and its payout
mod action;
mod hand;
mod settlement;

pub use action::*;
pub use hand::*;
pub use settlement::*;
