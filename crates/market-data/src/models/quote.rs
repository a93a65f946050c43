use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The most recent price a provider has for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuote {
    /// Symbol as reported by the provider
    pub symbol: String,

    /// Company or instrument display name, if the provider returned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Latest traded price
    pub price: Decimal,

    /// Quote currency
    pub currency: String,

    /// Provider timestamp, or fetch time when the provider omits it
    pub timestamp: DateTime<Utc>,

    /// Provider id (IEX, ...)
    pub source: String,
}
