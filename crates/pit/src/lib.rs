//! Multiplayer blackjack engine.
//!
//! This facade crate re-exports all public pit crates for convenient access.
//!
//! ## Crate Organization
//!
//! ### Core Types
//! - [`core`] — Type aliases, identity types, and table constants
//! - [`cards`] — Card primitives and the shuffled deck
//!
//! ### Domain Logic
//! - [`blackjack`] — Pure rules: hand valuation, actions, settlement math
//!
//! ### Application
//! - [`gameroom`] — Room and solo-table state machines
//! - [`hosting`] — Room registry and snapshot broadcasting

pub use pit_blackjack as blackjack;
pub use pit_cards as cards;
pub use pit_core as core;
pub use pit_gameroom as gameroom;
pub use pit_hosting as hosting;
