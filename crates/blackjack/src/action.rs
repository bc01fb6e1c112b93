use super::hand::Hand;
use super::hand::Standing;
use pit_core::Chips;

/// A seat decision during the playing phase.
///
/// Doubling is only offered on the first two cards and only when the
/// player's balance covers a second bet of the same size; the dealer
/// (house or player-bank) never doubles.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Action {
    Hit,
    Stand,
    Double,
}

impl Action {
    /// Legal action set for an open hand with the given balance and bet.
    /// Returns empty for blackjack or bust hands — they never act.
    pub fn legal(hand: &Hand, balance: Chips, bet: Chips) -> Vec<Action> {
        match hand.standing() {
            Standing::Blackjack | Standing::Bust => Vec::new(),
            Standing::Open => {
                let mut actions = vec![Action::Hit, Action::Stand];
                if hand.size() == 2 && balance >= bet {
                    actions.push(Action::Double);
                }
                actions
            }
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "HIT" => Ok(Action::Hit),
            "STAND" => Ok(Action::Stand),
            "DOUBLE" => Ok(Action::Double),
            _ => Err(format!("invalid action str: {}", s)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Hit => write!(f, "HIT"),
            Action::Stand => write!(f, "STAND"),
            Action::Double => write!(f, "DOUBLE"),
        }
    }
}
