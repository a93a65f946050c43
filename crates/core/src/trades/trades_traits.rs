//! Ledger repository trait.

use async_trait::async_trait;

use super::trades_model::{NewTrade, TradeRecord};
use crate::errors::Result;

/// The transaction ledger.
///
/// Implementations must:
/// - apply the account cash adjustment (`new_trade.cash_delta()`) and the
///   trade insert in one transaction, so either both land or neither does;
/// - assign strictly increasing sequence ids that are never reused;
/// - refuse, inside that same transaction, a write that would leave the
///   account's cash or the symbol's share aggregate negative
///   (`TradeError::InsufficientFunds` / `TradeError::InsufficientShares`).
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// Commits a trade together with its cash adjustment and returns the stored record.
    async fn append(&self, new_trade: NewTrade) -> Result<TradeRecord>;

    /// Returns every trade of the account, ascending by sequence id.
    fn query(&self, account_id: &str) -> Result<Vec<TradeRecord>>;
}
