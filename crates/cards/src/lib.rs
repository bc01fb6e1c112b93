//! Card primitives: ranks, suits, and a shuffled single deck.
//!
//! Everything renders and parses through the unicode suit glyphs ("A♠",
//! "10♥"), which is also the wire representation clients receive.
mod card;
mod deck;
mod rank;
mod suit;

pub use card::*;
pub use deck::*;
pub use rank::*;
pub use suit::*;
