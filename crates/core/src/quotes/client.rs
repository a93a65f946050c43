//! Adapter between the core quote seam and the `market-data` crate.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use papertrade_market_data::{LatestQuote, MarketDataProvider};

use super::model::Quote;
use crate::constants::BASE_CURRENCY;
use super::provider::QuoteProviderTrait;

/// Wraps a [`MarketDataProvider`] and flattens all of its failures into
/// "no quote". Quotes in a currency other than USD are dropped too.
/// Nothing is retried here.
pub struct MarketDataQuoteProvider {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataQuoteProvider {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    fn convert_quote(requested: &str, market_quote: LatestQuote) -> Quote {
        // Keep the symbol the caller asked for so ledger entries stay normalized.
        Quote {
            symbol: requested.to_string(),
            name: market_quote.name,
            price: market_quote.price,
        }
    }
}

#[async_trait]
impl QuoteProviderTrait for MarketDataQuoteProvider {
    async fn lookup(&self, symbol: &str) -> Option<Quote> {
        match self.provider.get_latest_quote(symbol).await {
            Ok(market_quote) if market_quote.currency != BASE_CURRENCY => {
                warn!(
                    "Ignoring {} quote for {} in {}",
                    self.provider.id(),
                    symbol,
                    market_quote.currency
                );
                None
            }
            Ok(market_quote) => {
                debug!(
                    "{} quoted {} at {}",
                    self.provider.id(),
                    symbol,
                    market_quote.price
                );
                Some(Self::convert_quote(symbol, market_quote))
            }
            Err(e) if e.is_symbol_not_found() => {
                debug!("{} does not know symbol {}", self.provider.id(), symbol);
                None
            }
            Err(e) => {
                warn!("Quote for {} unavailable: {}", symbol, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use papertrade_market_data::MarketDataError;
    use rust_decimal_macros::dec;

    struct FixedProvider {
        result: fn(&str) -> Result<LatestQuote, MarketDataError>,
    }

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn get_latest_quote(&self, symbol: &str) -> Result<LatestQuote, MarketDataError> {
            (self.result)(symbol)
        }
    }

    fn priced(symbol: &str) -> Result<LatestQuote, MarketDataError> {
        Ok(LatestQuote {
            symbol: symbol.to_lowercase(),
            name: Some("Apple Inc.".to_string()),
            price: dec!(189.25),
            currency: "USD".to_string(),
            timestamp: Utc::now(),
            source: "FIXED".to_string(),
        })
    }

    #[tokio::test]
    async fn test_lookup_converts_quote() {
        let adapter = MarketDataQuoteProvider::new(Arc::new(FixedProvider { result: priced }));
        let quote = adapter.lookup("AAPL").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.name.as_deref(), Some("Apple Inc."));
        assert_eq!(quote.price, dec!(189.25));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_none() {
        let adapter = MarketDataQuoteProvider::new(Arc::new(FixedProvider {
            result: |s| Err(MarketDataError::SymbolNotFound(s.to_string())),
        }));
        assert!(adapter.lookup("ZZZZ").await.is_none());
    }

    #[tokio::test]
    async fn test_foreign_currency_is_none() {
        let adapter = MarketDataQuoteProvider::new(Arc::new(FixedProvider {
            result: |s| {
                priced(s).map(|q| LatestQuote {
                    currency: "EUR".to_string(),
                    ..q
                })
            },
        }));
        assert!(adapter.lookup("SAP").await.is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_is_none() {
        let adapter = MarketDataQuoteProvider::new(Arc::new(FixedProvider {
            result: |_| {
                Err(MarketDataError::Timeout {
                    provider: "FIXED".to_string(),
                })
            },
        }));
        assert!(adapter.lookup("AAPL").await.is_none());
    }
}
