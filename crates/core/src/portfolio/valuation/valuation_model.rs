use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One active holding priced at the current quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub symbol: String,
    pub name: Option<String>,
    pub shares: i64,
    /// `None` when no quote was available.
    pub price: Option<Decimal>,
    /// `shares * price`, `None` when unpriced.
    pub market_value: Option<Decimal>,
}

/// Net worth report for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub account_id: String,
    pub cash: Decimal,
    pub holdings: Vec<HoldingValuation>,
    /// Sum of the known market values.
    pub holdings_value: Decimal,
    /// `cash + holdings_value`.
    pub net_worth: Decimal,
    /// Holdings left out of `holdings_value` for lack of a quote.
    pub unpriced_symbols: Vec<String>,
    pub valued_at: DateTime<Utc>,
}

impl PortfolioValuation {
    pub fn is_complete(&self) -> bool {
        self.unpriced_symbols.is_empty()
    }
}
