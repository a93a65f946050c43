//! User-facing quote lookup.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::model::{normalize_symbol, Quote};
use super::provider::QuoteProviderTrait;
use crate::errors::{Result, TradeError};

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Looks up the current quote for a raw, user-entered symbol.
    ///
    /// Fails with [`TradeError::InvalidSymbol`] when the symbol is malformed or
    /// cannot be priced.
    async fn get_quote(&self, raw_symbol: &str) -> Result<Quote>;

    /// Like [`get_quote`](Self::get_quote) but unpriceable symbols yield `Ok(None)`.
    async fn find_quote(&self, raw_symbol: &str) -> Result<Option<Quote>>;
}

pub struct QuoteService {
    provider: Arc<dyn QuoteProviderTrait>,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProviderTrait>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quote(&self, raw_symbol: &str) -> Result<Quote> {
        self.find_quote(raw_symbol)
            .await?
            .ok_or_else(|| TradeError::InvalidSymbol(raw_symbol.trim().to_string()).into())
    }

    async fn find_quote(&self, raw_symbol: &str) -> Result<Option<Quote>> {
        let symbol = normalize_symbol(raw_symbol)
            .ok_or_else(|| TradeError::InvalidSymbol(raw_symbol.trim().to_string()))?;
        let quote = self.provider.lookup(&symbol).await;
        if quote.is_none() {
            debug!("No quote available for {}", symbol);
        }
        Ok(quote)
    }
}
