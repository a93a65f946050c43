//! In-memory ledger shared by the service tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountRepositoryTrait, NewAccount};
use crate::errors::{DatabaseError, Error, Result, TradeError};
use crate::portfolio::holdings::shares_held;
use crate::trades::{NewTrade, TradeRecord, TradeRepositoryTrait};

#[derive(Default)]
struct LedgerState {
    accounts: Vec<Account>,
    trades: Vec<TradeRecord>,
    next_trade_id: i64,
}

/// Implements both repository traits over one shared state.
///
/// `append` yields to the scheduler before committing so concurrent callers
/// can interleave. With `guarded(false)` it skips the non-negative cash and
/// share checks, leaving the caller's validation as the only gate.
pub(crate) struct InMemoryLedger {
    state: Mutex<LedgerState>,
    guard: AtomicBool,
    fail_appends: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                next_trade_id: 1,
                ..LedgerState::default()
            }),
            guard: AtomicBool::new(true),
            fail_appends: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }

    pub fn add_account(&self, name: &str, cash: Decimal) -> Account {
        let now = Utc::now().naive_utc();
        let account = Account {
            id: format!("acc-{}", name),
            name: name.to_string(),
            cash,
            initial_cash: cash,
            created_at: now,
            updated_at: now,
        };
        self.state().accounts.push(account.clone());
        account
    }

    pub fn guarded(&self, enabled: bool) {
        self.guard.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_appends(&self, enabled: bool) {
        self.fail_appends.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    pub fn cash(&self, account_id: &str) -> Decimal {
        self.state()
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .map(|a| a.cash)
            .unwrap()
    }

    pub fn trade_count(&self) -> usize {
        self.state().trades.len()
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("simulated read failure".to_string()).into());
        }
        Ok(())
    }
}

/// A ledger with one account named "alice" holding `cash`.
pub(crate) fn seeded_ledger(cash: Decimal) -> (Arc<InMemoryLedger>, Account) {
    let ledger = Arc::new(InMemoryLedger::new());
    let account = ledger.add_account("alice", cash);
    (ledger, account)
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let mut state = self.state();
        if state.accounts.iter().any(|a| a.name == new_account.name) {
            return Err(DatabaseError::UniqueViolation(format!(
                "accounts.name: {}",
                new_account.name
            ))
            .into());
        }
        let cash = new_account.initial_cash.unwrap_or_default();
        let now = Utc::now().naive_utc();
        let account = Account {
            id: new_account
                .id
                .unwrap_or_else(|| format!("acc-{}", state.accounts.len() + 1)),
            name: new_account.name,
            cash,
            initial_cash: cash,
            created_at: now,
            updated_at: now,
        };
        state.accounts.push(account.clone());
        Ok(account)
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.check_reads()?;
        self.state()
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(account_id.to_string())))
    }

    fn list(&self) -> Result<Vec<Account>> {
        self.check_reads()?;
        Ok(self.state().accounts.clone())
    }
}

#[async_trait]
impl TradeRepositoryTrait for InMemoryLedger {
    async fn append(&self, new_trade: NewTrade) -> Result<TradeRecord> {
        new_trade.validate()?;

        tokio::task::yield_now().await;

        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(DatabaseError::TransactionFailed("simulated disk failure".to_string()).into());
        }

        let mut state = self.state();
        let own: Vec<TradeRecord> = state
            .trades
            .iter()
            .filter(|t| t.account_id == new_trade.account_id)
            .cloned()
            .collect();
        let held = shares_held(&own, &new_trade.symbol)?;
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == new_trade.account_id)
            .ok_or_else(|| DatabaseError::NotFound(new_trade.account_id.clone()))?;

        account.cash = if self.guard.load(Ordering::SeqCst) {
            new_trade.settle(account.cash, held)?.0
        } else {
            new_trade
                .cash_delta()
                .and_then(|delta| account.cash.checked_add(delta))
                .ok_or_else(|| TradeError::share_count_out_of_range(new_trade.shares.saturating_abs()))?
        };
        account.updated_at = Utc::now().naive_utc();

        let id = state.next_trade_id;
        state.next_trade_id += 1;
        let record = TradeRecord {
            id,
            account_id: new_trade.account_id,
            symbol: new_trade.symbol,
            shares: new_trade.shares,
            price_per_share: new_trade.price_per_share,
            executed_at: Utc::now(),
        };
        state.trades.push(record.clone());
        Ok(record)
    }

    fn query(&self, account_id: &str) -> Result<Vec<TradeRecord>> {
        self.check_reads()?;
        Ok(self
            .state()
            .trades
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }
}
