//! Quote provider seam and the in-process provider.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;

use super::model::{normalize_symbol, Quote};
use crate::errors::{Error, Result};

/// Source of current prices.
///
/// `lookup` is called fresh for every validation and every valuation, and is
/// never called while an account lock is held. `None` means the symbol cannot
/// be traded or valued right now; it is not an error.
#[async_trait]
pub trait QuoteProviderTrait: Send + Sync {
    /// `symbol` is already normalized.
    async fn lookup(&self, symbol: &str) -> Option<Quote>;
}

/// Fixed price table, used for offline runs and tests.
#[derive(Debug, Default)]
pub struct StaticQuoteProvider {
    quotes: RwLock<HashMap<String, Quote>>,
}

impl StaticQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `SYM=PRICE` pairs separated by commas,
    /// e.g. `AAPL=189.25,MSFT=410`.
    pub fn from_table(table: &str) -> Result<Self> {
        let provider = Self::new();
        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (raw_symbol, raw_price) = entry.split_once('=').ok_or_else(|| {
                Error::InvalidConfigValue(format!("Expected SYMBOL=PRICE, got '{}'", entry))
            })?;
            let symbol = normalize_symbol(raw_symbol).ok_or_else(|| {
                Error::InvalidConfigValue(format!("Invalid symbol '{}'", raw_symbol.trim()))
            })?;
            let price = Decimal::from_str(raw_price.trim()).map_err(|e| {
                Error::InvalidConfigValue(format!("Invalid price for {}: {}", symbol, e))
            })?;
            if price <= Decimal::ZERO {
                return Err(Error::InvalidConfigValue(format!(
                    "Price for {} must be positive",
                    symbol
                )));
            }
            provider.set_price(&symbol, price);
        }
        Ok(provider)
    }

    /// Sets or replaces the price of `symbol`.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.set_quote(Quote::new(symbol, price));
    }

    pub fn set_quote(&self, quote: Quote) {
        self.write_table().insert(quote.symbol.clone(), quote);
    }

    /// Makes `symbol` unpriceable.
    pub fn remove(&self, symbol: &str) {
        self.write_table().remove(symbol);
    }

    /// Every write is a single map operation, so a poisoned table is still
    /// whole and is taken back.
    fn write_table(&self) -> RwLockWriteGuard<'_, HashMap<String, Quote>> {
        self.quotes.write().unwrap_or_else(|poisoned| {
            warn!("Quote table lock was poisoned; recovering it");
            self.quotes.clear_poison();
            PoisonError::into_inner(poisoned)
        })
    }
}

#[async_trait]
impl QuoteProviderTrait for StaticQuoteProvider {
    async fn lookup(&self, symbol: &str) -> Option<Quote> {
        self.quotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .cloned()
    }
}
