use pit_core::DEALER_STAND;
use pit_core::Score;
use pit_core::TWENTY_ONE;
use pit_cards::Card;

/// Classification of a hand for turn-order purposes.
///
/// A two-card 21 is a natural and never acts; a bust hand is done; anything
/// else is open and owes the table a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Blackjack,
    Bust,
    Open,
}

/// An ordered sequence of cards belonging to one seat or the dealer.
///
/// Cards are only ever appended during a round; the hand is discarded
/// wholesale at reset. The score is the best total not exceeding 21 where
/// each ace counts 11 until that would bust, then softens to 1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    /// Best total ≤ 21 if any ace-downgrade path allows it.
    pub fn score(&self) -> Score {
        let mut aces = self.0.iter().filter(|c| c.rank().is_ace()).count();
        let mut total = self.0.iter().map(|c| c.points()).sum::<Score>();
        while total > TWENTY_ONE && aces > 0 {
            total -= 10;
            aces -= 1;
        }
        total
    }
    /// True while at least one ace still counts as 11.
    pub fn is_soft(&self) -> bool {
        let aces = self.0.iter().filter(|c| c.rank().is_ace()).count();
        let hard = self
            .0
            .iter()
            .map(|c| if c.rank().is_ace() { 1 } else { c.points() })
            .sum::<Score>();
        aces > 0 && hard + 10 <= TWENTY_ONE
    }
    pub fn is_bust(&self) -> bool {
        self.score() > TWENTY_ONE
    }
    /// Exactly two cards totaling 21.
    pub fn is_blackjack(&self) -> bool {
        self.size() == 2 && self.score() == TWENTY_ONE
    }
    pub fn standing(&self) -> Standing {
        if self.is_blackjack() {
            Standing::Blackjack
        } else if self.is_bust() {
            Standing::Bust
        } else {
            Standing::Open
        }
    }
    /// House drawing rule: hit below 17, stand on all 17s (soft included).
    pub fn must_hit(&self) -> bool {
        self.score() < DEALER_STAND
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} ({})", cards, self.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        Hand::from(Card::parse(s).unwrap())
    }

    #[test]
    fn ace_king_is_blackjack() {
        let hand = hand("A♠ K♥");
        assert_eq!(hand.score(), 21);
        assert!(hand.is_blackjack());
        assert_eq!(hand.standing(), Standing::Blackjack);
    }

    #[test]
    fn twenty_one_in_three_is_not_blackjack() {
        let hand = hand("7♠ 7♥ 7♦");
        assert_eq!(hand.score(), 21);
        assert!(!hand.is_blackjack());
        assert_eq!(hand.standing(), Standing::Open);
    }

    #[test]
    fn aces_soften_one_at_a_time() {
        assert_eq!(hand("A♠ A♥").score(), 12);
        assert_eq!(hand("A♠ A♥ 9♦").score(), 21);
        assert_eq!(hand("A♠ 9♦").score(), 20);
        assert_eq!(hand("A♠ 9♦ 5♣").score(), 15);
    }

    #[test]
    fn soft_goes_hard_when_forced() {
        let soft = hand("A♠ 6♥");
        assert!(soft.is_soft());
        assert_eq!(soft.score(), 17);
        let hard = hand("A♠ 6♥ 9♦");
        assert!(!hard.is_soft());
        assert_eq!(hard.score(), 16);
    }

    #[test]
    fn never_busts_with_downgrade_available() {
        let hand = hand("A♠ A♥ A♦ A♣ 7♠");
        assert_eq!(hand.score(), 21);
        assert!(!hand.is_bust());
    }

    #[test]
    fn busts_past_twenty_one() {
        let hand = hand("10♣ 9♠ 5♥");
        assert_eq!(hand.score(), 24);
        assert!(hand.is_bust());
        assert_eq!(hand.standing(), Standing::Bust);
    }

    #[test]
    fn dealer_draws_to_sixteen_stands_on_seventeen() {
        assert!(hand("7♦ 9♣").must_hit());
        assert!(!hand("7♦ 10♣").must_hit());
        assert!(!hand("A♠ 6♥").must_hit()); // soft 17 stands, hard rule
    }
}
