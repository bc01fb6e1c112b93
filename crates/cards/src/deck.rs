use super::card::Card;
use pit_core::DECK_SIZE;
use rand::seq::SliceRandom;

/// The shoe ran dry mid-round.
///
/// Never expected at legal table sizes, but the engine surfaces it as an
/// error rather than panicking so a single bad round cannot take down the
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustedDeck;

impl std::fmt::Display for ExhaustedDeck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck exhausted")
    }
}

impl std::error::Error for ExhaustedDeck {}

/// A single 52-card shoe, shuffled once at construction.
///
/// Cards come off the top one at a time via [`Deck::draw`]; the shoe is
/// replaced (not refilled) at the start of every round. A deck built
/// `From<Vec<Card>>` deals in exactly the given order, which is how tests
/// and hand replays stack known deals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a freshly shuffled 52-card deck.
    pub fn new() -> Self {
        let mut cards = (0..DECK_SIZE as u8).map(Card::from).collect::<Vec<_>>();
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }
    /// Draws the next card, or fails once the shoe is empty.
    pub fn draw(&mut self) -> Result<Card, ExhaustedDeck> {
        self.0.pop().ok_or(ExhaustedDeck)
    }
    /// Cards left in the shoe.
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

/// Stacked deck: deals the given cards first-to-last.
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().rev().collect())
    }
}
