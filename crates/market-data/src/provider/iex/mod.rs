//! IEX Cloud compatible quote provider.
//!
//! Uses the `/stock/{symbol}/quote` endpoint, which answers with a JSON object
//! carrying `symbol`, `companyName` and `latestPrice`. Unknown symbols come back
//! as HTTP 404. The base URL is configurable so any IEX-compatible mirror works.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::LatestQuote;
use crate::provider::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";
const PROVIDER_ID: &str = "IEX";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /stock/{symbol}/quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    symbol: String,
    company_name: Option<String>,
    latest_price: Option<f64>,
    /// Epoch milliseconds
    latest_update: Option<i64>,
    currency: Option<String>,
}

// ============================================================================
// IexProvider
// ============================================================================

/// IEX-compatible market data provider.
pub struct IexProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IexProvider {
    /// Create a provider against `base_url` (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/stock/{}/quote",
            self.base_url,
            urlencoding::encode(symbol)
        )
    }

    async fn fetch(&self, symbol: &str) -> Result<String, MarketDataError> {
        let url = self.quote_url(symbol);
        debug!("IEX request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Turns a raw `/quote` payload into a [`LatestQuote`].
fn parse_quote(requested: &str, body: &str) -> Result<LatestQuote, MarketDataError> {
    let response: QuoteResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse quote response: {}", e),
        })?;

    let price = response
        .latest_price
        .ok_or_else(|| MarketDataError::SymbolNotFound(requested.to_string()))?;

    let price = Decimal::try_from(price).map_err(|_| MarketDataError::InvalidResponse {
        provider: PROVIDER_ID.to_string(),
        message: format!("Invalid latest price: {}", price),
    })?;

    if price <= Decimal::ZERO {
        warn!("IEX returned non-positive price {} for {}", price, requested);
        return Err(MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Non-positive latest price: {}", price),
        });
    }

    let timestamp = response
        .latest_update
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Ok(LatestQuote {
        symbol: response.symbol,
        name: response.company_name.filter(|n| !n.trim().is_empty()),
        price,
        currency: response.currency.unwrap_or_else(|| "USD".to_string()),
        timestamp,
        source: PROVIDER_ID.to_string(),
    })
}

#[async_trait]
impl MarketDataProvider for IexProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<LatestQuote, MarketDataError> {
        if self.api_key.trim().is_empty() {
            return Err(MarketDataError::NotConfigured(
                "IEX API key is empty".to_string(),
            ));
        }
        let body = self.fetch(symbol).await?;
        parse_quote(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_quote() {
        let body = r#"{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "latestPrice": 189.25,
            "latestUpdate": 1700000000000,
            "currency": "USD"
        }"#;

        let quote = parse_quote("AAPL", body).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.name.as_deref(), Some("Apple Inc."));
        assert_eq!(quote.price, dec!(189.25));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(quote.source, "IEX");
    }

    #[test]
    fn test_parse_quote_without_price_is_symbol_not_found() {
        let body = r#"{ "symbol": "ZZZZ", "companyName": null, "latestPrice": null }"#;
        let err = parse_quote("ZZZZ", body).unwrap_err();
        assert!(err.is_symbol_not_found());
    }

    #[test]
    fn test_parse_quote_rejects_zero_price() {
        let body = r#"{ "symbol": "ZERO", "latestPrice": 0.0 }"#;
        let err = parse_quote("ZERO", body).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
    }

    #[test]
    fn test_parse_quote_malformed_body() {
        let err = parse_quote("AAPL", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
    }

    #[test]
    fn test_blank_company_name_is_dropped() {
        let body = r#"{ "symbol": "XYZ", "companyName": "  ", "latestPrice": 1.5 }"#;
        let quote = parse_quote("XYZ", body).unwrap();
        assert_eq!(quote.name, None);
        assert_eq!(quote.currency, "USD");
    }

    #[test]
    fn test_quote_url_encodes_symbol() {
        let provider = IexProvider::new("https://example.test/stable/", "key");
        assert_eq!(
            provider.quote_url("BRK.B"),
            "https://example.test/stable/stock/BRK.B/quote"
        );
        assert_eq!(
            provider.quote_url("A B"),
            "https://example.test/stable/stock/A%20B/quote"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        let provider = IexProvider::new(DEFAULT_BASE_URL, "");
        let err = provider.get_latest_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotConfigured(_)));
    }
}
