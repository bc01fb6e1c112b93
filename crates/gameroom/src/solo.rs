use super::error::RoomError;
use super::ledger::Ledger;
use super::message::SoloSnapshot;
use super::user::User;
use pit_blackjack::Action;
use pit_blackjack::Hand;
use pit_blackjack::Outcome;
use pit_cards::Deck;
use pit_core::Chips;
use pit_core::ID;
use pit_core::TABLE_MIN;
use pit_core::TWENTY_ONE;
use pit_core::Unique;

/// One hand of blackjack against the house, no seats and no turn order.
///
/// The whole table is the round: it is created by the opening deal and
/// discarded once its snapshot reports FINISHED. The same ledger contract
/// as [`Room`](super::Room) applies — the bet is debited up front and the
/// payout (a push refunds the bet) credited at settlement.
#[derive(Debug)]
pub struct SoloTable {
    id: ID<Self>,
    user: ID<User>,
    deck: Deck,
    player: Hand,
    dealer: Hand,
    bet: Chips,
    finished: bool,
    outcome: Option<Outcome>,
    payout: Chips,
}

impl Unique for SoloTable {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl SoloTable {
    /// Debits the wager and deals the opening hands. A natural settles the
    /// table immediately.
    pub async fn deal(
        id: ID<Self>,
        user: ID<User>,
        bet: Chips,
        ledger: &dyn Ledger,
    ) -> Result<Self, RoomError> {
        if bet < TABLE_MIN {
            return Err(RoomError::InvalidBet("below table minimum".into()));
        }
        ledger
            .debit(user, bet)
            .await
            .map_err(|_| RoomError::InvalidBet("insufficient balance".into()))?;
        let mut table = Self {
            id,
            user,
            deck: Deck::new(),
            player: Hand::empty(),
            dealer: Hand::empty(),
            bet,
            finished: false,
            outcome: None,
            payout: 0,
        };
        table.player.push(table.deck.draw()?);
        table.player.push(table.deck.draw()?);
        table.dealer.push(table.deck.draw()?);
        table.dealer.push(table.deck.draw()?);
        log::info!("[solo {}] dealt for {}", table.id, bet);
        if table.player.is_blackjack() {
            table.settle(ledger).await;
        }
        Ok(table)
    }
    pub fn user(&self) -> ID<User> {
        self.user
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
    /// Dispatches a decoded playing action.
    pub async fn act(&mut self, action: Action, ledger: &dyn Ledger) -> Result<(), RoomError> {
        match action {
            Action::Hit => self.hit(ledger).await,
            Action::Stand => self.stand(ledger).await,
            Action::Double => self.double(ledger).await,
        }
    }
    /// Draws one card. Going bust settles without a house draw; reaching
    /// 21 auto-stands.
    pub async fn hit(&mut self, ledger: &dyn Ledger) -> Result<(), RoomError> {
        self.open()?;
        let card = self.deck.draw()?;
        self.player.push(card);
        log::debug!("[solo {}] player draws {}", self.id, card);
        if self.player.is_bust() || self.player.score() == TWENTY_ONE {
            self.settle(ledger).await;
        }
        Ok(())
    }
    /// Ends the player's turn; the house plays out and the table settles.
    pub async fn stand(&mut self, ledger: &dyn Ledger) -> Result<(), RoomError> {
        self.open()?;
        self.settle(ledger).await;
        Ok(())
    }
    /// Doubles the wager on the first two cards, draws exactly one card,
    /// and settles. Debit-first, like the multiplayer table.
    pub async fn double(&mut self, ledger: &dyn Ledger) -> Result<(), RoomError> {
        self.open()?;
        if self.player.size() != 2 {
            return Err(RoomError::InvalidBet(
                "double only on the first two cards".into(),
            ));
        }
        ledger
            .debit(self.user, self.bet)
            .await
            .map_err(|_| RoomError::InvalidBet("insufficient balance".into()))?;
        self.bet *= 2;
        let card = self.deck.draw()?;
        self.player.push(card);
        log::info!("[solo {}] doubled to {}", self.id, self.bet);
        self.settle(ledger).await;
        Ok(())
    }
    fn open(&self) -> Result<(), RoomError> {
        if self.finished {
            Err(RoomError::InvalidAction("hand already settled".into()))
        } else {
            Ok(())
        }
    }
    /// House draws to 16 and stands on all 17s, unless the player already
    /// busted; then the table resolves and pays.
    async fn settle(&mut self, ledger: &dyn Ledger) {
        if !self.player.is_bust() {
            while self.dealer.must_hit() {
                match self.deck.draw() {
                    Ok(card) => self.dealer.push(card),
                    Err(_) => break, // single deck cannot run out in one hand
                }
            }
        }
        let outcome = Outcome::of(&self.player, &self.dealer);
        self.payout = outcome.payout(self.bet);
        self.outcome = Some(outcome);
        self.finished = true;
        if self.payout > 0 {
            ledger.credit(self.user, self.payout).await;
        }
        log::info!("[solo {}] {} pays {}", self.id, outcome, self.payout);
    }
    /// Current state for the player. The house's second card stays hidden
    /// until settlement.
    pub fn snapshot(&self) -> SoloSnapshot {
        let hidden = !self.finished;
        SoloSnapshot {
            id: self.id.to_string(),
            status: if self.finished { "FINISHED" } else { "PLAYING" }.to_string(),
            player_cards: self.player.cards().iter().map(|c| c.to_string()).collect(),
            player_value: self.player.score(),
            dealer_cards: self
                .dealer
                .cards()
                .iter()
                .take(if hidden { 1 } else { self.dealer.size() })
                .map(|c| c.to_string())
                .collect(),
            dealer_value: match hidden {
                true => None,
                false => Some(self.dealer.score()),
            },
            can_double: !self.finished && self.player.size() == 2,
            bet_amount: self.bet,
            payout: self.payout,
            result: self.outcome.map(|o| o.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Bankroll;
    use pit_cards::Card;

    /// Table dealt from a stacked deck, with the bet already debited.
    async fn dealt(cards: &str, bet: Chips, funding: Chips) -> (SoloTable, Bankroll, ID<User>) {
        let bank = Bankroll::new();
        let user = User::new("solo").id();
        bank.fund(user, funding).await;
        bank.debit(user, bet).await.unwrap();
        let mut table = SoloTable {
            id: ID::default(),
            user,
            deck: Deck::from(Card::parse(cards).unwrap()),
            player: Hand::empty(),
            dealer: Hand::empty(),
            bet,
            finished: false,
            outcome: None,
            payout: 0,
        };
        for _ in 0..2 {
            let card = table.deck.draw().unwrap();
            table.player.push(card);
        }
        for _ in 0..2 {
            let card = table.deck.draw().unwrap();
            table.dealer.push(card);
        }
        (table, bank, user)
    }

    #[tokio::test]
    async fn underfunded_and_undersized_bets_rejected() {
        let bank = Bankroll::new();
        let user = User::new("solo").id();
        bank.fund(user, 5000).await;
        assert!(SoloTable::deal(ID::default(), user, 500, &bank).await.is_err());
        assert!(
            SoloTable::deal(ID::default(), user, 6000, &bank)
                .await
                .is_err()
        );
        assert_eq!(bank.balance(user).await, 5000);
    }

    #[tokio::test]
    async fn stand_plays_out_the_house() {
        let (mut table, bank, user) = dealt("10♣ 9♠ 10♦ 6♣ 10♥", 1000, 10_000).await;
        table.stand(&bank).await.unwrap();
        // house drew to 26 and busted; 19 wins even money
        assert!(table.finished());
        let snap = table.snapshot();
        assert_eq!(snap.result.as_deref(), Some("WIN"));
        assert_eq!(snap.payout, 2000);
        assert_eq!(snap.dealer_cards.len(), 3);
        assert_eq!(bank.balance(user).await, 11_000);
    }

    #[tokio::test]
    async fn bust_settles_without_house_draw() {
        let (mut table, bank, user) = dealt("10♣ 9♠ 10♦ 6♣ 5♥", 1000, 10_000).await;
        table.hit(&bank).await.unwrap(); // 24
        let snap = table.snapshot();
        assert_eq!(snap.result.as_deref(), Some("BUST"));
        assert_eq!(snap.dealer_cards.len(), 2); // house never drew
        assert_eq!(snap.payout, 0);
        assert_eq!(bank.balance(user).await, 9000);
    }

    #[tokio::test]
    async fn push_refunds_the_bet() {
        let (mut table, bank, user) = dealt("10♣ 8♠ 10♦ 8♣", 1000, 10_000).await;
        table.stand(&bank).await.unwrap();
        assert_eq!(table.snapshot().result.as_deref(), Some("PUSH"));
        assert_eq!(bank.balance(user).await, 10_000);
    }

    #[tokio::test]
    async fn double_draws_once_and_settles() {
        let (mut table, bank, user) = dealt("5♣ 6♠ 10♦ 7♣ 10♥", 1000, 10_000).await;
        table.double(&bank).await.unwrap(); // 21 vs 17
        let snap = table.snapshot();
        assert_eq!(snap.bet_amount, 2000);
        assert_eq!(snap.payout, 4000);
        assert!(!snap.can_double);
        assert_eq!(bank.balance(user).await, 12_000);
        assert_eq!(
            table.hit(&bank).await,
            Err(RoomError::InvalidAction("hand already settled".into()))
        );
    }

    #[tokio::test]
    async fn unfunded_double_leaves_hand_open() {
        let (mut table, bank, _) = dealt("5♣ 6♠ 10♦ 7♣ 10♥", 1000, 1000).await;
        assert!(table.double(&bank).await.is_err());
        assert!(!table.finished());
        assert_eq!(table.snapshot().player_cards.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_hides_the_hole_until_settlement() {
        let (table, _, _) = dealt("10♣ 9♠ 10♦ 6♣", 1000, 10_000).await;
        let snap = table.snapshot();
        assert_eq!(snap.dealer_cards, vec!["10♦"]);
        assert!(snap.dealer_value.is_none());
        assert!(snap.can_double);
    }
}
