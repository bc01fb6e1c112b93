use super::user::User;
use pit_core::Chips;
use pit_core::ID;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// The balance collaborator rejected a debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    InsufficientFunds,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds => write!(f, "insufficient funds"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// External balance ledger consumed by the engine.
///
/// Debits are all-or-nothing: a failed debit must leave the balance
/// untouched, which is what lets the room treat every wagering action as
/// atomic. Credits never fail — the engine only credits amounts the ledger
/// previously accepted as debits (or house payouts the house absorbs).
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    async fn debit(&self, user: ID<User>, amount: Chips) -> Result<(), LedgerError>;
    async fn credit(&self, user: ID<User>, amount: Chips);
    async fn balance(&self, user: ID<User>) -> Chips;
}

/// In-memory ledger for tests and local play.
#[derive(Debug, Default)]
pub struct Bankroll(Mutex<HashMap<ID<User>, Chips>>);

impl Bankroll {
    pub fn new() -> Self {
        Self::default()
    }
    /// Seeds a balance, replacing any existing one.
    pub async fn fund(&self, user: ID<User>, amount: Chips) {
        self.0.lock().await.insert(user, amount);
    }
}

#[async_trait::async_trait]
impl Ledger for Bankroll {
    async fn debit(&self, user: ID<User>, amount: Chips) -> Result<(), LedgerError> {
        let mut balances = self.0.lock().await;
        let balance = balances.entry(user).or_insert(0);
        if *balance < amount {
            Err(LedgerError::InsufficientFunds)
        } else {
            *balance -= amount;
            Ok(())
        }
    }
    async fn credit(&self, user: ID<User>, amount: Chips) {
        *self.0.lock().await.entry(user).or_insert(0) += amount;
    }
    async fn balance(&self, user: ID<User>) -> Chips {
        self.0.lock().await.get(&user).copied().unwrap_or(0)
    }
}
