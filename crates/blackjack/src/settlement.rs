use super::hand::Hand;
use pit_core::Chips;

/// End-of-round result for one seat against the dealer.
///
/// The ordering of checks matters: a bust seat loses before the dealer is
/// even consulted, and a natural beats every dealer outcome except another
/// natural — including a dealer bust.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Outcome {
    Blackjack,
    Win,
    Push,
    Lose,
    Bust,
}

impl Outcome {
    /// Resolves a seat hand against the dealer hand.
    pub fn of(seat: &Hand, dealer: &Hand) -> Self {
        if seat.is_bust() {
            Outcome::Bust
        } else if seat.is_blackjack() && dealer.is_blackjack() {
            Outcome::Push
        } else if seat.is_blackjack() {
            Outcome::Blackjack
        } else if dealer.is_bust() {
            Outcome::Win
        } else if seat.score() > dealer.score() {
            Outcome::Win
        } else if seat.score() == dealer.score() {
            Outcome::Push
        } else {
            Outcome::Lose
        }
    }
    /// Total returned to the seat: stake plus profit where due.
    ///
    /// Naturals pay 3:2, so the seat receives `bet * 5 / 2` in integer
    /// chips (truncating on odd bets). A push refunds the stake exactly.
    pub fn payout(&self, bet: Chips) -> Chips {
        match self {
            Outcome::Blackjack => bet * 5 / 2,
            Outcome::Win => bet * 2,
            Outcome::Push => bet,
            Outcome::Lose | Outcome::Bust => 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Outcome::Blackjack => write!(f, "BLACKJACK"),
            Outcome::Win => write!(f, "WIN"),
            Outcome::Push => write!(f, "PUSH"),
            Outcome::Lose => write!(f, "LOSE"),
            Outcome::Bust => write!(f, "BUST"),
        }
    }
}

/// Net result for a player acting as the bank: everything the seats staked
/// minus everything paid back out. Strictly zero-sum across the table.
pub fn banker_net(stakes: &[(Chips, Chips)]) -> Chips {
    stakes.iter().map(|(bet, payout)| bet - payout).sum()
}
