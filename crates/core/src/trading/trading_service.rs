use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};

use super::account_locks::AccountLocks;
use super::ledger_audit::{audit_ledger, LedgerAudit};
use super::trade_validator::{parse_share_count, validate_buy, validate_sell};
use super::trading_model::TradeProposal;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{Error, Result, TradeError};
use crate::portfolio::holdings::shares_held;
use crate::quotes::{normalize_symbol, QuoteProviderTrait};
use crate::trades::{TradeRecord, TradeRepositoryTrait, TradeSide};

#[async_trait]
pub trait TradingServiceTrait: Send + Sync {
    /// Runs a proposal through lookup, validation and commit.
    ///
    /// Returns the committed record, or an error with nothing written.
    async fn submit(&self, proposal: TradeProposal) -> Result<TradeRecord>;

    async fn buy(&self, account_id: &str, symbol: &str, shares: i64) -> Result<TradeRecord>;

    async fn sell(&self, account_id: &str, symbol: &str, shares: i64) -> Result<TradeRecord>;

    /// All trades of the account, ascending by sequence id.
    fn history(&self, account_id: &str) -> Result<Vec<TradeRecord>>;

    /// Replays the account's ledger and compares it with the stored balance.
    async fn audit_account(&self, account_id: &str) -> Result<LedgerAudit>;
}

pub struct TradingService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
    account_locks: Arc<AccountLocks>,
}

impl TradingService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
        account_locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            account_repository,
            trade_repository,
            quote_provider,
            account_locks,
        }
    }
}

#[async_trait]
impl TradingServiceTrait for TradingService {
    async fn submit(&self, proposal: TradeProposal) -> Result<TradeRecord> {
        let symbol = normalize_symbol(&proposal.symbol)
            .ok_or_else(|| TradeError::InvalidSymbol(proposal.symbol.trim().to_string()))?;

        // Network lookup happens before the lock so a slow provider never
        // blocks other trades on this account.
        let quote = self.quote_provider.lookup(&symbol).await;
        if quote.is_none() {
            return Err(TradeError::InvalidSymbol(symbol).into());
        }
        let requested = parse_share_count(&proposal.shares)?;

        let _guard = self.account_locks.lock(&proposal.account_id).await;

        let account = self.account_repository.get_by_id(&proposal.account_id)?;
        let approved = match proposal.side {
            TradeSide::Buy => validate_buy(&account, &symbol, requested, quote.as_ref())?,
            TradeSide::Sell => {
                let records = self.trade_repository.query(&account.id)?;
                let held = shares_held(&records, &symbol)?;
                validate_sell(&account, &symbol, requested, quote.as_ref(), held)?
            }
        };
        debug!(
            "Approved {} {} {} @ {} for account {}",
            approved.side, requested, approved.symbol, approved.price_per_share, account.id
        );

        match self.trade_repository.append(approved.into_new_trade()).await {
            Ok(record) => {
                info!(
                    "Committed trade #{} for account {}: {} {} @ {}",
                    record.id,
                    record.account_id,
                    record.shares,
                    record.symbol,
                    record.price_per_share
                );
                Ok(record)
            }
            Err(Error::Trade(reason)) => {
                warn!(
                    "Ledger refused trade for account {} after validation: {}",
                    account.id, reason
                );
                Err(Error::Trade(reason))
            }
            Err(e) => {
                error!("Failed to commit trade for account {}: {}", account.id, e);
                Err(e)
            }
        }
    }

    async fn buy(&self, account_id: &str, symbol: &str, shares: i64) -> Result<TradeRecord> {
        self.submit(TradeProposal::buy(account_id, symbol, shares)).await
    }

    async fn sell(&self, account_id: &str, symbol: &str, shares: i64) -> Result<TradeRecord> {
        self.submit(TradeProposal::sell(account_id, symbol, shares)).await
    }

    fn history(&self, account_id: &str) -> Result<Vec<TradeRecord>> {
        let account = self.account_repository.get_by_id(account_id)?;
        self.trade_repository.query(&account.id)
    }

    async fn audit_account(&self, account_id: &str) -> Result<LedgerAudit> {
        let _guard = self.account_locks.lock(account_id).await;
        let account = self.account_repository.get_by_id(account_id)?;
        let records = self.trade_repository.query(account_id)?;
        let audit = audit_ledger(&account, &records)?;
        if !audit.is_consistent() {
            warn!("Ledger audit failed for account {}: {:?}", account_id, audit);
        }
        Ok(audit)
    }
}
