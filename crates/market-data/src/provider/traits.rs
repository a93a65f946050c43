//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::LatestQuote;

/// Trait for market data providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use papertrade_market_data::{LatestQuote, MarketDataError, MarketDataProvider};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<LatestQuote, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for an already-normalized symbol.
    ///
    /// Returns `MarketDataError::SymbolNotFound` when the provider does not
    /// know the symbol; any other error means the provider could not answer.
    async fn get_latest_quote(&self, symbol: &str) -> Result<LatestQuote, MarketDataError>;
}
