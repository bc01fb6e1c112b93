use pit_core::Chips;
use pit_core::Position;
use pit_core::Score;
use serde::Serialize;

/// Full room state pushed to every subscriber after each mutation.
///
/// Always the complete picture, never a diff: clients reconcile by
/// replacement, which costs bandwidth but removes an entire class of
/// ordering bugs at table sizes this small. Snapshots are viewer-aware —
/// the dealer's hole card is omitted (and the dealer value withheld) until
/// dealer resolution begins, except for the hole card's owner.
#[derive(Clone, Debug, Serialize)]
pub struct RoomSnapshot {
    pub id: String,
    pub name: String,
    pub status: String,
    pub min_bet: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bet: Option<Chips>,
    pub max_seats: usize,
    pub dealer_seat: Position,
    pub current_seat: Position,
    pub dealer_cards: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_value: Option<Score>,
    pub seats: Vec<SeatSnapshot>,
}

/// One seat's slice of the room snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct SeatSnapshot {
    pub seat: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub status: String,
    pub cards: Vec<String>,
    pub value: Score,
    pub bet_amount: Chips,
    pub payout: Chips,
}

/// Lobby listing entry for a joinable room.
#[derive(Clone, Debug, Serialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub min_bet: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bet: Option<Chips>,
    pub seats: usize,
    pub max_seats: usize,
    pub status: String,
}

/// Solo table state returned from every solo action.
#[derive(Clone, Debug, Serialize)]
pub struct SoloSnapshot {
    pub id: String,
    pub status: String,
    pub player_cards: Vec<String>,
    pub player_value: Score,
    pub dealer_cards: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_value: Option<Score>,
    pub can_double: bool,
    pub bet_amount: Chips,
    pub payout: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}
