use super::error::RoomError;
use super::ledger::Ledger;
use super::message::RoomSnapshot;
use super::message::RoomSummary;
use super::message::SeatSnapshot;
use super::rotation;
use super::seat::Seat;
use super::seat::SeatStatus;
use super::user::User;
use pit_blackjack::Action;
use pit_blackjack::Hand;
use pit_blackjack::Outcome;
use pit_blackjack::Standing;
use pit_blackjack::banker_net;
use pit_cards::Deck;
use pit_core::Chips;
use pit_core::HOUSE;
use pit_core::ID;
use pit_core::MAX_SEATS;
use pit_core::NAME_LIMIT;
use pit_core::Position;
use pit_core::TABLE_MIN;
use pit_core::TWENTY_ONE;
use pit_core::Unique;

/// Room phase. Only the transitions in the round cycle are legal:
/// WAITING → BETTING on the first wager, BETTING → PLAYING at the deal,
/// PLAYING → FINISHED at settlement, FINISHED → WAITING on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Waiting,
    Betting,
    Playing,
    Finished,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "WAITING"),
            Self::Betting => write!(f, "BETTING"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Finished => write!(f, "FINISHED"),
        }
    }
}

/// A multiplayer blackjack table.
///
/// The room is the aggregate: it owns the seats, the shoe, and the dealer
/// hand (the house's, or the bank seat's in a player-dealer room), and it
/// is the only thing that mutates them. The hosting layer serializes all
/// actions against one room, so everything here is single-threaded logic.
///
/// Funds only ever move through the [`Ledger`] collaborator: bets are
/// debited when placed, payouts credited at settlement, and the engine
/// itself neither creates nor destroys a chip.
#[derive(Debug)]
pub struct Room {
    id: ID<Self>,
    name: String,
    owner: ID<User>,
    min_bet: Chips,
    max_bet: Option<Chips>,
    dealer_seat: Position,
    current_seat: Position,
    status: RoomStatus,
    dealer: Hand,
    deck: Deck,
    seats: Vec<Seat>,
}

impl Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Room {
    /// Opens a table and seats the creator at seat 1. In a player-dealer
    /// room the creator's seat is the bank. Inputs are clamped rather than
    /// rejected: bet floor, seat count, and name length.
    pub fn new(
        id: ID<Self>,
        name: &str,
        min_bet: Chips,
        max_bet: Option<Chips>,
        max_seats: usize,
        player_dealer: bool,
        owner: User,
    ) -> Self {
        let max_seats = max_seats.clamp(1, MAX_SEATS);
        let mut seats = (1..=max_seats).map(Seat::new).collect::<Vec<_>>();
        seats[0].occupy(owner.clone());
        Self {
            id,
            name: name.chars().take(NAME_LIMIT).collect(),
            owner: owner.id(),
            min_bet: min_bet.max(TABLE_MIN),
            max_bet,
            dealer_seat: if player_dealer { 1 } else { HOUSE },
            current_seat: HOUSE,
            status: RoomStatus::Waiting,
            dealer: Hand::empty(),
            deck: Deck::new(),
            seats,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn owner(&self) -> ID<User> {
        self.owner
    }
    pub fn status(&self) -> RoomStatus {
        self.status
    }
    pub fn dealer_seat(&self) -> Position {
        self.dealer_seat
    }
    pub fn current_seat(&self) -> Position {
        self.current_seat
    }
    pub fn min_bet(&self) -> Chips {
        self.min_bet
    }
    pub fn max_bet(&self) -> Option<Chips> {
        self.max_bet
    }
    pub fn contains(&self, user: ID<User>) -> bool {
        self.seats.iter().any(|s| s.is_held_by(user))
    }
    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_empty()).count()
    }
    /// Occupant of the bank seat, if this is a player-dealer room.
    pub fn banker(&self) -> Option<ID<User>> {
        self.seats
            .iter()
            .find(|s| s.number() == self.dealer_seat)
            .and_then(Seat::user)
    }
}

impl Room {
    /// Seats a user at the lowest empty seat.
    pub fn join(&mut self, user: User) -> Result<Position, RoomError> {
        if self.contains(user.id()) {
            return Err(RoomError::AlreadyInRoom);
        }
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.is_empty())
            .ok_or(RoomError::RoomFull)?;
        seat.occupy(user);
        let number = seat.number();
        log::info!("[room {}] seat {} taken", self.id, number);
        Ok(number)
    }
    /// Vacates the caller's seat. Leaving mid-round forfeits the hand; the
    /// bank cannot leave while a round is in progress. Ownership transfers
    /// to the lowest occupied seat when the owner walks.
    pub async fn leave(&mut self, user: ID<User>, ledger: &dyn Ledger) -> Result<(), RoomError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.is_held_by(user))
            .ok_or(RoomError::NotSeated)?;
        let number = seat.number();
        if number == self.dealer_seat && self.status == RoomStatus::Playing {
            return Err(RoomError::InvalidAction(
                "the bank cannot leave mid-round".into(),
            ));
        }
        let was_turn = self.current_seat == number;
        seat.vacate();
        log::info!("[room {}] seat {} vacated", self.id, number);
        if number == self.dealer_seat {
            self.dealer_seat = HOUSE;
        }
        if self.owner == user {
            if let Some(next) = self.seats.iter().find_map(Seat::user) {
                self.owner = next;
                log::info!("[room {}] ownership transferred", self.id);
            }
        }
        match self.status {
            RoomStatus::Playing => {
                if !self.live_bets() {
                    // everyone with chips on the felt walked; nothing to settle
                    self.current_seat = HOUSE;
                    self.status = RoomStatus::Finished;
                    log::warn!("[room {}] round abandoned", self.id);
                } else if was_turn {
                    self.advance(ledger).await?;
                }
            }
            RoomStatus::Betting => {
                if !self.seats.iter().any(|s| s.status() == SeatStatus::Betting) {
                    self.status = RoomStatus::Waiting;
                }
            }
            _ => {}
        }
        Ok(())
    }
    /// Places a wager for the caller's seat and moves the room to BETTING.
    /// The debit happens inside the same critical section, so a rejected
    /// wager leaves both the room and the balance untouched.
    pub async fn bet(
        &mut self,
        user: ID<User>,
        amount: Chips,
        ledger: &dyn Ledger,
    ) -> Result<(), RoomError> {
        if !matches!(self.status, RoomStatus::Waiting | RoomStatus::Betting) {
            return Err(RoomError::InvalidAction("betting is closed".into()));
        }
        let number = self
            .seats
            .iter()
            .find(|s| s.is_held_by(user))
            .map(Seat::number)
            .ok_or(RoomError::NotSeated)?;
        if number == self.dealer_seat {
            return Err(RoomError::InvalidBet("the bank does not wager".into()));
        }
        if self.seat_ref(number).status() != SeatStatus::Waiting {
            return Err(RoomError::InvalidBet("bet already placed".into()));
        }
        if amount < self.min_bet {
            return Err(RoomError::InvalidBet("below table minimum".into()));
        }
        if self.max_bet.is_some_and(|max| amount > max) {
            return Err(RoomError::InvalidBet("above table maximum".into()));
        }
        ledger
            .debit(user, amount)
            .await
            .map_err(|_| RoomError::InvalidBet("insufficient balance".into()))?;
        self.seat_mut(number).wager(amount);
        self.status = RoomStatus::Betting;
        log::info!("[room {}] seat {} wagered {}", self.id, number, amount);
        Ok(())
    }
    /// Deals the round. Only the owner or the seated bank may start, and
    /// only once at least one seat has wagered.
    pub async fn start_round(
        &mut self,
        caller: ID<User>,
        ledger: &dyn Ledger,
    ) -> Result<(), RoomError> {
        self.authorize(caller)?;
        if self.status != RoomStatus::Betting {
            return Err(RoomError::InvalidAction("no bets placed".into()));
        }
        self.deck = Deck::new();
        self.deal(ledger).await
    }
    /// Dispatches a decoded playing action for the acting seat.
    pub async fn act(
        &mut self,
        caller: ID<User>,
        action: Action,
        ledger: &dyn Ledger,
    ) -> Result<(), RoomError> {
        match action {
            Action::Hit => self.hit(caller, ledger).await,
            Action::Stand => self.stand(caller, ledger).await,
            Action::Double => self.double(caller, ledger).await,
        }
    }
    /// Draws one card for the acting seat (or the bank).
    pub async fn hit(&mut self, caller: ID<User>, ledger: &dyn Ledger) -> Result<(), RoomError> {
        let number = self.turn_of(caller)?;
        let card = self.deck.draw()?;
        if number == self.dealer_seat {
            self.dealer.push(card);
            log::debug!("[room {}] bank draws {}", self.id, card);
            if self.dealer.is_bust() || self.dealer.score() == TWENTY_ONE {
                self.settle(ledger).await;
            }
        } else {
            log::debug!("[room {}] seat {} draws {}", self.id, number, card);
            let seat = self.seat_mut(number);
            seat.hand_mut().push(card);
            if seat.hand().is_bust() {
                seat.set_status(SeatStatus::Bust);
                self.advance(ledger).await?;
            } else if seat.hand().score() == TWENTY_ONE {
                seat.set_status(SeatStatus::Stand);
                self.advance(ledger).await?;
            }
        }
        Ok(())
    }
    /// Stands the acting seat (or the bank, which ends the round).
    pub async fn stand(&mut self, caller: ID<User>, ledger: &dyn Ledger) -> Result<(), RoomError> {
        let number = self.turn_of(caller)?;
        if number == self.dealer_seat {
            self.settle(ledger).await;
        } else {
            self.seat_mut(number).set_status(SeatStatus::Stand);
            self.advance(ledger).await?;
        }
        Ok(())
    }
    /// Doubles the wager, draws exactly one card, and forces a stand
    /// (bust included). Debit-first: an unfunded double changes nothing.
    pub async fn double(&mut self, caller: ID<User>, ledger: &dyn Ledger) -> Result<(), RoomError> {
        let number = self.turn_of(caller)?;
        if number == self.dealer_seat {
            return Err(RoomError::InvalidAction("the bank cannot double".into()));
        }
        if self.seat_ref(number).hand().size() != 2 {
            return Err(RoomError::InvalidBet(
                "double only on the first two cards".into(),
            ));
        }
        let bet = self.seat_ref(number).bet();
        ledger
            .debit(caller, bet)
            .await
            .map_err(|_| RoomError::InvalidBet("insufficient balance".into()))?;
        let card = self.deck.draw()?;
        let seat = self.seat_mut(number);
        seat.double_bet();
        seat.hand_mut().push(card);
        seat.set_status(SeatStatus::Stand);
        log::info!("[room {}] seat {} doubled to {}", self.id, number, bet * 2);
        self.advance(ledger).await
    }
    /// Clears hands and bets after settlement; occupied seats wait for the
    /// next round's wagers.
    pub fn reset(&mut self, caller: ID<User>) -> Result<(), RoomError> {
        self.authorize(caller)?;
        if self.status != RoomStatus::Finished {
            return Err(RoomError::InvalidAction("round not finished".into()));
        }
        self.dealer = Hand::empty();
        self.seats.iter_mut().for_each(Seat::renew);
        self.status = RoomStatus::Waiting;
        self.current_seat = HOUSE;
        log::info!("[room {}] table reset", self.id);
        Ok(())
    }
}

impl Room {
    fn authorize(&self, caller: ID<User>) -> Result<(), RoomError> {
        if caller == self.owner || Some(caller) == self.banker() {
            Ok(())
        } else {
            Err(RoomError::NotAuthorized)
        }
    }
    fn seat_ref(&self, number: Position) -> &Seat {
        &self.seats[number - 1]
    }
    fn seat_mut(&mut self, number: Position) -> &mut Seat {
        &mut self.seats[number - 1]
    }
    fn live_bets(&self) -> bool {
        self.seats
            .iter()
            .any(|s| s.bet() > 0 && s.number() != self.dealer_seat)
    }
    /// Resolves the caller to the acting seat, or rejects the action.
    fn turn_of(&self, caller: ID<User>) -> Result<Position, RoomError> {
        if self.status != RoomStatus::Playing {
            return Err(RoomError::InvalidAction("no round in progress".into()));
        }
        let seat = self
            .seats
            .iter()
            .find(|s| s.is_held_by(caller))
            .ok_or(RoomError::NotSeated)?;
        if seat.number() != self.current_seat {
            return Err(RoomError::NotYourTurn);
        }
        Ok(seat.number())
    }
    /// Deals two cards to every wagered seat and two to the dealer, then
    /// hands the turn to the first open seat. Naturals never act.
    async fn deal(&mut self, ledger: &dyn Ledger) -> Result<(), RoomError> {
        self.dealer = Hand::empty();
        for seat in self
            .seats
            .iter_mut()
            .filter(|s| s.status() == SeatStatus::Betting)
        {
            let first = self.deck.draw()?;
            let second = self.deck.draw()?;
            seat.hand_mut().push(first);
            seat.hand_mut().push(second);
            seat.set_status(match seat.hand().standing() {
                Standing::Blackjack => SeatStatus::Blackjack,
                _ => SeatStatus::Playing,
            });
        }
        self.dealer.push(self.deck.draw()?);
        self.dealer.push(self.deck.draw()?);
        self.status = RoomStatus::Playing;
        self.current_seat = HOUSE;
        log::info!("[room {}] round dealt", self.id);
        self.advance(ledger).await
    }
    /// Moves the turn to the next open seat; when player seats are
    /// exhausted, the bank acts (player-dealer) or the house auto-plays
    /// and the round settles.
    async fn advance(&mut self, ledger: &dyn Ledger) -> Result<(), RoomError> {
        let next = rotation::next(&self.seats, self.dealer_seat, self.current_seat);
        if next != HOUSE {
            self.current_seat = next;
            return Ok(());
        }
        if self.dealer_seat != HOUSE {
            if self.dealer.standing() == Standing::Open {
                // current_seat only ever points at a PLAYING seat
                let dealer_seat = self.dealer_seat;
                self.seat_mut(dealer_seat).set_status(SeatStatus::Playing);
                self.current_seat = dealer_seat;
                return Ok(());
            }
            // a natural bank has nothing to decide
            self.settle(ledger).await;
            return Ok(());
        }
        self.house_play()?;
        self.settle(ledger).await;
        Ok(())
    }
    /// House rule: draw to 16, stand on all 17s.
    fn house_play(&mut self) -> Result<(), RoomError> {
        while self.dealer.must_hit() {
            let card = self.deck.draw()?;
            self.dealer.push(card);
            log::debug!("[room {}] house draws {}", self.id, card);
        }
        Ok(())
    }
    /// Resolves every wagered seat against the dealer hand, credits
    /// payouts, and applies the bank's zero-sum net in player-dealer
    /// rooms. Bets were debited when placed, so settlement only credits
    /// (and debits the bank when the table won).
    async fn settle(&mut self, ledger: &dyn Ledger) {
        self.current_seat = HOUSE;
        self.status = RoomStatus::Finished;
        let dealer = self.dealer.clone();
        let dealer_seat = self.dealer_seat;
        let mut stakes = Vec::new();
        for seat in self.seats.iter_mut() {
            if seat.number() == dealer_seat || seat.bet() == 0 {
                continue;
            }
            let Some(user) = seat.user() else { continue };
            let outcome = Outcome::of(seat.hand(), &dealer);
            let payout = outcome.payout(seat.bet());
            seat.set_status(SeatStatus::from(outcome));
            seat.set_payout(payout);
            stakes.push((user, seat.bet(), payout));
        }
        for (user, _, payout) in &stakes {
            if *payout > 0 {
                ledger.credit(*user, *payout).await;
            }
        }
        if dealer_seat != HOUSE {
            let net = banker_net(
                &stakes
                    .iter()
                    .map(|(_, bet, payout)| (*bet, *payout))
                    .collect::<Vec<_>>(),
            );
            let banker = self.banker();
            let seat = self.seat_mut(dealer_seat);
            seat.set_status(SeatStatus::Stand);
            seat.set_payout(net);
            if let Some(user) = banker {
                if net > 0 {
                    ledger.credit(user, net).await;
                } else if net < 0 {
                    if let Err(e) = ledger.debit(user, -net).await {
                        log::error!("[room {}] bank cannot cover {}: {}", self.id, -net, e);
                    }
                }
            }
        }
        log::info!("[room {}] round settled", self.id);
    }
}

impl Room {
    /// True while the dealer's second card is face down: all of the
    /// playing phase until the bank's turn begins (player-dealer), or all
    /// of it (house dealer, revealed only at settlement).
    fn hole_hidden(&self) -> bool {
        self.status == RoomStatus::Playing
            && !(self.dealer_seat != HOUSE && self.current_seat == self.dealer_seat)
    }
    /// Full state as seen by `viewer`. The bank sees its own hole card;
    /// everyone else sees one dealer card and no dealer value until the
    /// hole is revealed.
    pub fn snapshot(&self, viewer: Option<ID<User>>) -> RoomSnapshot {
        let owns_hole = match (viewer, self.banker()) {
            (Some(v), Some(b)) => v == b,
            _ => false,
        };
        let hidden = self.hole_hidden() && !owns_hole;
        let dealer_cards = self
            .dealer
            .cards()
            .iter()
            .take(if hidden { 1 } else { self.dealer.size() })
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        let dealer_value = match (hidden, self.dealer.size()) {
            (true, _) | (_, 0) => None,
            _ => Some(self.dealer.score()),
        };
        RoomSnapshot {
            id: self.id.to_string(),
            name: self.name.clone(),
            status: self.status.to_string(),
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            max_seats: self.seats.len(),
            dealer_seat: self.dealer_seat,
            current_seat: self.current_seat,
            dealer_cards,
            dealer_value,
            seats: self.seats.iter().map(SeatSnapshot::from).collect(),
        }
    }
    /// Lobby listing entry.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.to_string(),
            name: self.name.clone(),
            owner: self
                .seats
                .iter()
                .filter_map(Seat::occupant)
                .find(|u| u.id() == self.owner)
                .map(|u| u.name().to_string())
                .unwrap_or_default(),
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            seats: self.occupied(),
            max_seats: self.seats.len(),
            status: self.status.to_string(),
        }
    }
}

impl From<&Seat> for SeatSnapshot {
    fn from(seat: &Seat) -> Self {
        Self {
            seat: seat.number(),
            user_id: seat.user().map(|id| id.to_string()),
            username: seat.occupant().map(|u| u.name().to_string()),
            status: seat.status().to_string(),
            cards: seat.hand().cards().iter().map(|c| c.to_string()).collect(),
            value: seat.hand().score(),
            bet_amount: seat.bet(),
            payout: seat.payout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Bankroll;
    use pit_cards::Card;

    fn stacked(s: &str) -> Deck {
        Deck::from(Card::parse(s).unwrap())
    }

    struct Table {
        room: Room,
        bank: Bankroll,
        users: Vec<User>,
    }

    /// Room with `n` seated users funded 10_000 each. Player-dealer rooms
    /// put the bank at seat 1.
    async fn table(n: usize, player_dealer: bool) -> Table {
        let users = (0..n)
            .map(|i| User::new(format!("p{}", i + 1)))
            .collect::<Vec<_>>();
        let bank = Bankroll::new();
        for user in &users {
            bank.fund(user.id(), 10_000).await;
        }
        let mut room = Room::new(
            ID::default(),
            "test table",
            1000,
            None,
            6,
            player_dealer,
            users[0].clone(),
        );
        for user in &users[1..] {
            room.join(user.clone()).unwrap();
        }
        Table { room, bank, users }
    }

    #[tokio::test]
    async fn betting_moves_room_to_betting() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        assert_eq!(room.status(), RoomStatus::Waiting);
        room.bet(users[1].id(), 1500, &bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Betting);
        assert_eq!(bank.balance(users[1].id()).await, 8500);
    }

    #[tokio::test]
    async fn bet_bounds_and_rebet_rejected() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        assert_eq!(
            room.bet(users[1].id(), 500, &bank).await,
            Err(RoomError::InvalidBet("below table minimum".into()))
        );
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        assert_eq!(
            room.bet(users[1].id(), 1000, &bank).await,
            Err(RoomError::InvalidBet("bet already placed".into()))
        );
        assert_eq!(bank.balance(users[1].id()).await, 9000);
    }

    #[tokio::test]
    async fn unfunded_bet_changes_nothing() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        bank.fund(users[1].id(), 500).await;
        assert_eq!(
            room.bet(users[1].id(), 1000, &bank).await,
            Err(RoomError::InvalidBet("insufficient balance".into()))
        );
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_eq!(bank.balance(users[1].id()).await, 500);
    }

    #[tokio::test]
    async fn bank_seat_cannot_wager() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, true).await;
        assert_eq!(
            room.bet(users[0].id(), 1000, &bank).await,
            Err(RoomError::InvalidBet("the bank does not wager".into()))
        );
    }

    #[tokio::test]
    async fn turn_order_and_house_settlement() {
        let Table {
            mut room,
            bank,
            users,
        } = table(3, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.bet(users[2].id(), 1000, &bank).await.unwrap();
        // deal order: seat 2, seat 3, house
        room.deck = stacked("10♣ 9♠ 5♥ 5♦ 10♦ 7♣ 10♠");
        room.deal(&bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Playing);
        assert_eq!(room.current_seat(), 2);
        // out of turn: rejected, state unchanged
        let before = serde_json::to_string(&room.snapshot(None)).unwrap();
        assert_eq!(
            room.hit(users[2].id(), &bank).await,
            Err(RoomError::NotYourTurn)
        );
        let after = serde_json::to_string(&room.snapshot(None)).unwrap();
        assert_eq!(before, after);
        room.stand(users[1].id(), &bank).await.unwrap();
        assert_eq!(room.current_seat(), 3);
        room.hit(users[2].id(), &bank).await.unwrap(); // 5+5+10 = 20
        room.stand(users[2].id(), &bank).await.unwrap();
        // house stood on 17; 19 and 20 both win even money
        assert_eq!(room.status(), RoomStatus::Finished);
        assert_eq!(bank.balance(users[1].id()).await, 11_000);
        assert_eq!(bank.balance(users[2].id()).await, 11_000);
    }

    #[tokio::test]
    async fn bust_forfeits_and_advances_without_input() {
        let Table {
            mut room,
            bank,
            users,
        } = table(3, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.bet(users[2].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("10♣ 9♠ 10♥ 8♦ 10♦ 7♣ 5♥");
        room.deal(&bank).await.unwrap();
        room.hit(users[1].id(), &bank).await.unwrap(); // 10+9+5 = 24
        assert_eq!(room.seat_ref(2).status(), SeatStatus::Bust);
        assert_eq!(room.current_seat(), 3);
        room.stand(users[2].id(), &bank).await.unwrap();
        assert_eq!(room.seat_ref(2).payout(), 0);
        assert_eq!(bank.balance(users[1].id()).await, 9000);
    }

    #[tokio::test]
    async fn natural_pays_three_to_two_even_against_dealer_bust() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        // seat 2 holds a natural; dealer 16 draws 10 and busts
        room.deck = stacked("A♠ K♥ 7♦ 9♣ 10♠");
        room.deal(&bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Finished);
        assert_eq!(room.seat_ref(2).status(), SeatStatus::Blackjack);
        assert_eq!(room.seat_ref(2).payout(), 2500);
        assert_eq!(bank.balance(users[1].id()).await, 11_500);
    }

    #[tokio::test]
    async fn auto_stand_on_twenty_one() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("5♠ 6♥ 10♦ 7♣ 10♥");
        room.deal(&bank).await.unwrap();
        room.hit(users[1].id(), &bank).await.unwrap(); // 5+6+10 = 21
        // no further input needed: seat auto-stood, house played, settled
        assert_eq!(room.status(), RoomStatus::Finished);
        assert_eq!(room.seat_ref(2).status(), SeatStatus::Win);
    }

    #[tokio::test]
    async fn double_draws_once_and_forces_stand() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("5♠ 6♥ 10♦ 7♣ 10♥");
        room.deal(&bank).await.unwrap();
        room.double(users[1].id(), &bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Finished);
        assert_eq!(room.seat_ref(2).bet(), 2000);
        assert_eq!(room.seat_ref(2).payout(), 4000); // 21 beats 17
        assert_eq!(bank.balance(users[1].id()).await, 12_000);
    }

    #[tokio::test]
    async fn unfunded_double_leaves_seat_playing() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        bank.fund(users[1].id(), 1000).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("5♠ 6♥ 10♦ 7♣ 10♥");
        room.deal(&bank).await.unwrap();
        assert_eq!(
            room.double(users[1].id(), &bank).await,
            Err(RoomError::InvalidBet("insufficient balance".into()))
        );
        assert_eq!(room.seat_ref(2).status(), SeatStatus::Playing);
        assert_eq!(room.seat_ref(2).hand().size(), 2);
        assert_eq!(room.seat_ref(2).bet(), 1000);
        assert_eq!(bank.balance(users[1].id()).await, 0);
    }

    #[tokio::test]
    async fn bank_acts_last_and_settlement_is_zero_sum() {
        let Table {
            mut room,
            bank,
            users,
        } = table(3, true).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.bet(users[2].id(), 2000, &bank).await.unwrap();
        // seats 2 and 3, then the bank's own hand
        room.deck = stacked("10♣ 9♠ 10♥ 8♦ 10♦ 7♣");
        room.deal(&bank).await.unwrap();
        // the bank's hole card is visible to the bank only
        assert_eq!(room.snapshot(Some(users[0].id())).dealer_cards.len(), 2);
        assert_eq!(room.snapshot(Some(users[1].id())).dealer_cards.len(), 1);
        assert!(room.snapshot(None).dealer_value.is_none());
        room.stand(users[1].id(), &bank).await.unwrap();
        room.stand(users[2].id(), &bank).await.unwrap();
        // all player seats done: the bank acts, no house auto-play
        assert_eq!(room.current_seat(), 1);
        assert_eq!(room.status(), RoomStatus::Playing);
        // the acting bank seat reads PLAYING, not an idle WAITING
        assert_eq!(room.seat_ref(1).status(), SeatStatus::Playing);
        room.stand(users[0].id(), &bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Finished);
        // 19 and 18 both beat 17: payouts 2000 + 4000 on bets 1000 + 2000
        assert_eq!(room.seat_ref(1).payout(), -3000);
        assert_eq!(bank.balance(users[0].id()).await, 7000);
        // zero-sum: Σ payouts + bank net == Σ bets
        let total: Chips = (0..3).map(|i| room.seat_ref(i + 1).payout()).sum();
        assert_eq!(total, 3000);
        // conservation: no chips created or destroyed across the table
        let mut balances = 0;
        for user in &users {
            balances += bank.balance(user.id()).await;
        }
        assert_eq!(balances, 30_000);
    }

    #[tokio::test]
    async fn snapshot_is_idempotent_and_hides_the_hole() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("10♣ 9♠ 10♦ 7♣");
        room.deal(&bank).await.unwrap();
        let one = serde_json::to_string(&room.snapshot(None)).unwrap();
        let two = serde_json::to_string(&room.snapshot(None)).unwrap();
        assert_eq!(one, two);
        assert_eq!(room.snapshot(None).dealer_cards.len(), 1);
        assert!(room.snapshot(None).dealer_value.is_none());
        room.stand(users[1].id(), &bank).await.unwrap();
        assert_eq!(room.snapshot(None).dealer_cards.len(), 2);
        assert_eq!(room.snapshot(None).dealer_value, Some(17));
    }

    #[tokio::test]
    async fn reset_returns_to_waiting() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.bet(users[1].id(), 1000, &bank).await.unwrap();
        room.deck = stacked("10♣ 9♠ 10♦ 7♣");
        room.deal(&bank).await.unwrap();
        room.stand(users[1].id(), &bank).await.unwrap();
        assert_eq!(room.status(), RoomStatus::Finished);
        assert_eq!(room.reset(users[1].id()), Err(RoomError::NotAuthorized));
        room.reset(users[0].id()).unwrap();
        assert_eq!(room.status(), RoomStatus::Waiting);
        assert_eq!(room.seat_ref(2).status(), SeatStatus::Waiting);
        assert_eq!(room.seat_ref(2).bet(), 0);
        assert!(room.snapshot(None).dealer_cards.is_empty());
    }

    #[tokio::test]
    async fn join_fills_lowest_seat_and_full_room_rejects() {
        let owner = User::new("owner");
        let mut room = Room::new(ID::default(), "tiny", 1000, None, 2, false, owner.clone());
        assert_eq!(room.join(owner.clone()), Err(RoomError::AlreadyInRoom));
        assert_eq!(room.join(User::new("p2")), Ok(2));
        assert_eq!(room.join(User::new("p3")), Err(RoomError::RoomFull));
    }

    #[tokio::test]
    async fn owner_leaving_transfers_ownership() {
        let Table {
            mut room,
            bank,
            users,
        } = table(2, false).await;
        room.leave(users[0].id(), &bank).await.unwrap();
        assert_eq!(room.owner(), users[1].id());
        assert_eq!(room.occupied(), 1);
        assert_eq!(
            room.leave(users[0].id(), &bank).await,
            Err(RoomError::NotSeated)
        );
    }

    #[tokio::test]
    async fn name_and_limits_are_clamped() {
        let owner = User::new("owner");
        let room = Room::new(
            ID::default(),
            "a very long room name that overflows the limit",
            1,
            None,
            99,
            false,
            owner,
        );
        assert_eq!(room.min_bet(), TABLE_MIN);
        assert_eq!(room.name().chars().count(), NAME_LIMIT);
        assert_eq!(room.snapshot(None).seats.len(), MAX_SEATS);
    }
}
