use super::rank::Rank;
use super::suit::Suit;
use pit_core::Arbitrary;
use pit_core::Score;

/// A playing card: a rank paired with a suit.
///
/// The 52 cards map bijectively to `0..52` via `rank * 4 + suit`, which is
/// how a fresh deck is enumerated. Display follows the table convention the
/// clients expect: rank text then suit glyph, e.g. `A♠` or `10♥`.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// Hard point value of this card (ace counts 11 here).
    pub fn points(&self) -> Score {
        self.rank.points()
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0..52
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.rank) * 4 + u8::from(c.suit)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| String::from("empty card str"))?;
        let rank = Rank::try_from(&s[..split])?;
        let suit = Suit::try_from(&s[split..])?;
        Ok(Card::from((rank, suit)))
    }
}

impl Card {
    /// Parses a whitespace-separated list of card notations.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        s.split_whitespace()
            .map(Self::try_from)
            .collect::<Result<Vec<Self>, _>>()
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        Self::from((Rank::random(), Suit::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_rank_suit() {
        let card = Card::random();
        assert_eq!(card, Card::from((card.rank(), card.suit())));
    }

    #[test]
    fn bijective_u8() {
        for n in 0..52u8 {
            assert_eq!(n, u8::from(Card::from(n)));
        }
    }

    #[test]
    fn bijective_str() {
        let card = Card::random();
        assert_eq!(card, Card::try_from(card.to_string().as_str()).unwrap());
    }

    #[test]
    fn parses_ten_of_hearts() {
        let card = Card::try_from("10♥").unwrap();
        assert_eq!(card.rank(), Rank::Ten);
        assert_eq!(card.suit(), Suit::H);
    }

    #[test]
    fn parses_list() {
        let cards = Card::parse("A♠ K♥ 10♦").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].rank(), Rank::Ace);
    }
}
