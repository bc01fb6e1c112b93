use super::seat::Seat;
use super::seat::SeatStatus;
use pit_core::HOUSE;
use pit_core::Position;

/// Turn order over player seats.
///
/// Strictly ascending seat numbers among PLAYING seats, skipping the bank
/// seat entirely — the bank always acts last, after every player seat has
/// reached a terminal status. Order never wraps within a round, so "next"
/// is just the smallest PLAYING seat number above the current one.
pub(crate) fn next(seats: &[Seat], dealer: Position, current: Position) -> Position {
    seats
        .iter()
        .filter(|s| s.number() > current)
        .filter(|s| s.number() != dealer)
        .filter(|s| s.status() == SeatStatus::Playing)
        .map(Seat::number)
        .min()
        .unwrap_or(HOUSE)
}
