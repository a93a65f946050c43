use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, warn};

use super::valuation_calculator::calculate_valuation;
use super::valuation_model::PortfolioValuation;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::portfolio::holdings::HoldingsServiceTrait;
use crate::quotes::QuoteProviderTrait;
use crate::trading::AccountLocks;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values the account's active holdings at current quotes. Read-only.
    async fn valuate(&self, account_id: &str) -> Result<PortfolioValuation>;
}

pub struct ValuationService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    holdings_service: Arc<dyn HoldingsServiceTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
    account_locks: Arc<AccountLocks>,
}

impl ValuationService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        holdings_service: Arc<dyn HoldingsServiceTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
        account_locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            account_repository,
            holdings_service,
            quote_provider,
            account_locks,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn valuate(&self, account_id: &str) -> Result<PortfolioValuation> {
        // Cash and holdings must come from the same ledger state; quotes are
        // fetched after the lock is released.
        let (cash, holdings) = {
            let _guard = self.account_locks.lock(account_id).await;
            let account = self.account_repository.get_by_id(account_id)?;
            let holdings = self.holdings_service.compute_holdings(account_id)?;
            (account.cash, holdings)
        };

        let lookups = holdings.keys().map(|symbol| async move {
            (symbol.clone(), self.quote_provider.lookup(symbol).await)
        });
        let quotes: HashMap<_, _> = join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(symbol, quote)| quote.map(|q| (symbol, q)))
            .collect();

        let valuation = calculate_valuation(account_id, cash, &holdings, &quotes, Utc::now())?;
        if !valuation.is_complete() {
            warn!(
                "Valuation of account {} is missing quotes for {:?}",
                account_id, valuation.unpriced_symbols
            );
        }
        debug!(
            "Account {} net worth {} ({} holdings)",
            account_id,
            valuation.net_worth,
            valuation.holdings.len()
        );
        Ok(valuation)
    }
}
