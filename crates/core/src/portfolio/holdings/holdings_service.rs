use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::holdings_calculator::{compute_holdings, shares_held};
use super::holdings_model::Holding;
use crate::errors::Result;
use crate::trades::TradeRepositoryTrait;

pub trait HoldingsServiceTrait: Send + Sync {
    /// Active holdings of the account, keyed by symbol.
    fn compute_holdings(&self, account_id: &str) -> Result<BTreeMap<String, i64>>;

    /// Active holdings as a list ordered by symbol (the sellable symbols).
    fn list_holdings(&self, account_id: &str) -> Result<Vec<Holding>>;

    /// Current aggregate of one symbol, 0 when never traded or sold out.
    fn shares_held(&self, account_id: &str, symbol: &str) -> Result<i64>;
}

pub struct HoldingsService {
    trade_repository: Arc<dyn TradeRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(trade_repository: Arc<dyn TradeRepositoryTrait>) -> Self {
        Self { trade_repository }
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn compute_holdings(&self, account_id: &str) -> Result<BTreeMap<String, i64>> {
        let records = self.trade_repository.query(account_id)?;
        let holdings = compute_holdings(&records)?;
        debug!(
            "Aggregated {} trades into {} holdings for account {}",
            records.len(),
            holdings.len(),
            account_id
        );
        Ok(holdings)
    }

    fn list_holdings(&self, account_id: &str) -> Result<Vec<Holding>> {
        Ok(self
            .compute_holdings(account_id)?
            .into_iter()
            .map(|(symbol, shares)| Holding { symbol, shares })
            .collect())
    }

    fn shares_held(&self, account_id: &str, symbol: &str) -> Result<i64> {
        let records = self.trade_repository.query(account_id)?;
        shares_held(&records, symbol)
    }
}
