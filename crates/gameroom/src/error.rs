use pit_cards::ExhaustedDeck;

/// Why a client action was rejected.
///
/// Every rejection is all-or-nothing: the room that produced one of these
/// is byte-identical to the room before the action arrived. Clients treat
/// any error as a no-op and re-render from the last snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Action arrived from a seat other than `current_seat`.
    NotYourTurn,
    /// Wager rejected: out of bounds, already placed, or unfunded.
    InvalidBet(String),
    /// Action is not legal in the room's current phase.
    InvalidAction(String),
    /// No empty seat to join.
    RoomFull,
    /// The user already occupies a seat (here or in another room).
    AlreadyInRoom,
    /// The caller does not occupy a seat in this room.
    NotSeated,
    /// Only the owner or the seated bank may do this.
    NotAuthorized,
    /// The shoe ran out of cards mid-round.
    Exhausted,
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::InvalidBet(s) => write!(f, "invalid bet: {}", s),
            Self::InvalidAction(s) => write!(f, "invalid action: {}", s),
            Self::RoomFull => write!(f, "room is full"),
            Self::AlreadyInRoom => write!(f, "already seated in a room"),
            Self::NotSeated => write!(f, "not seated in this room"),
            Self::NotAuthorized => write!(f, "only the owner or the bank may do that"),
            Self::Exhausted => write!(f, "deck exhausted"),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<ExhaustedDeck> for RoomError {
    fn from(_: ExhaustedDeck) -> Self {
        Self::Exhausted
    }
}
