use super::user::User;
use pit_blackjack::Hand;
use pit_blackjack::Outcome;
use pit_core::Chips;
use pit_core::ID;
use pit_core::Position;
use pit_core::Unique;

/// Lifecycle of a seat within one room.
///
/// EMPTY → WAITING on join, WAITING → BETTING on wager, BETTING → PLAYING
/// at the deal, then one terminal status at settlement, and back to
/// WAITING at reset (or EMPTY on leave). `current_seat` only ever points
/// at a PLAYING seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Empty,
    Waiting,
    Betting,
    Playing,
    Stand,
    Bust,
    Win,
    Lose,
    Push,
    Blackjack,
}

impl SeatStatus {
    /// True once the seat's round is decided and it leaves turn order.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Stand | Self::Bust | Self::Win | Self::Lose | Self::Push | Self::Blackjack
        )
    }
}

impl From<Outcome> for SeatStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Blackjack => Self::Blackjack,
            Outcome::Win => Self::Win,
            Outcome::Push => Self::Push,
            Outcome::Lose => Self::Lose,
            Outcome::Bust => Self::Bust,
        }
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "EMPTY"),
            Self::Waiting => write!(f, "WAITING"),
            Self::Betting => write!(f, "BETTING"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Stand => write!(f, "STAND"),
            Self::Bust => write!(f, "BUST"),
            Self::Win => write!(f, "WIN"),
            Self::Lose => write!(f, "LOSE"),
            Self::Push => write!(f, "PUSH"),
            Self::Blackjack => write!(f, "BLACKJACK"),
        }
    }
}

/// One player slot at a room's table.
///
/// Seat numbers are 1-based and stable for the room's lifetime. The seat
/// owns its hand, current wager, and last payout; the room owns the seat.
#[derive(Debug)]
pub struct Seat {
    number: Position,
    occupant: Option<User>,
    status: SeatStatus,
    bet: Chips,
    payout: Chips,
    hand: Hand,
}

impl Seat {
    pub fn new(number: Position) -> Self {
        Self {
            number,
            occupant: None,
            status: SeatStatus::Empty,
            bet: 0,
            payout: 0,
            hand: Hand::empty(),
        }
    }
    pub fn number(&self) -> Position {
        self.number
    }
    pub fn occupant(&self) -> Option<&User> {
        self.occupant.as_ref()
    }
    pub fn user(&self) -> Option<ID<User>> {
        self.occupant.as_ref().map(User::id)
    }
    pub fn status(&self) -> SeatStatus {
        self.status
    }
    pub fn bet(&self) -> Chips {
        self.bet
    }
    pub fn payout(&self) -> Chips {
        self.payout
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
    pub fn is_held_by(&self, user: ID<User>) -> bool {
        self.user() == Some(user)
    }
}

impl Seat {
    pub(crate) fn occupy(&mut self, user: User) {
        self.occupant = Some(user);
        self.status = SeatStatus::Waiting;
    }
    pub(crate) fn vacate(&mut self) {
        self.occupant = None;
        self.status = SeatStatus::Empty;
        self.bet = 0;
        self.payout = 0;
        self.hand = Hand::empty();
    }
    /// Clears round state; an occupied seat waits for the next round.
    pub(crate) fn renew(&mut self) {
        self.bet = 0;
        self.payout = 0;
        self.hand = Hand::empty();
        self.status = match self.occupant {
            Some(_) => SeatStatus::Waiting,
            None => SeatStatus::Empty,
        };
    }
    pub(crate) fn wager(&mut self, amount: Chips) {
        self.bet = amount;
        self.status = SeatStatus::Betting;
    }
    pub(crate) fn set_status(&mut self, status: SeatStatus) {
        self.status = status;
    }
    pub(crate) fn set_payout(&mut self, payout: Chips) {
        self.payout = payout;
    }
    pub(crate) fn double_bet(&mut self) {
        self.bet *= 2;
    }
    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}
