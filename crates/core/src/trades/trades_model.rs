//! Ledger domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::trades_errors::TradeError;
use crate::{errors::ValidationError, Error, Result};

fn signed_value(shares: i64, price: Decimal) -> Option<Decimal> {
    Decimal::from(shares).checked_mul(price).map(|value| -value)
}

/// Direction of a trade, derived from the sign of its share count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed ledger entry. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Sequence id, strictly increasing per ledger.
    pub id: i64,
    pub account_id: String,
    pub symbol: String,
    /// Positive for a buy, negative for a sell.
    pub shares: i64,
    pub price_per_share: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn side(&self) -> TradeSide {
        if self.shares < 0 {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }

    /// Gross amount of the trade, always non-negative. `None` on overflow.
    pub fn gross_amount(&self) -> Option<Decimal> {
        Decimal::from(self.shares.unsigned_abs()).checked_mul(self.price_per_share)
    }

    /// Effect of this trade on the account's cash: `-(shares * price)`.
    pub fn cash_delta(&self) -> Option<Decimal> {
        signed_value(self.shares, self.price_per_share)
    }
}

/// A trade that passed validation and is ready to be appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub account_id: String,
    pub symbol: String,
    pub shares: i64,
    pub price_per_share: Decimal,
}

impl NewTrade {
    pub fn side(&self) -> TradeSide {
        if self.shares < 0 {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }

    /// Cash adjustment that must be committed together with this trade.
    /// `None` when `shares * price` does not fit in a `Decimal`.
    pub fn cash_delta(&self) -> Option<Decimal> {
        signed_value(self.shares, self.price_per_share)
    }

    /// Balance and symbol position after this trade lands on an account
    /// holding `cash` and `held` shares of the symbol.
    ///
    /// This is the check a ledger repeats at commit time: nothing may go
    /// negative and nothing may leave its numeric range.
    pub fn settle(
        &self,
        cash: Decimal,
        held: i64,
    ) -> std::result::Result<(Decimal, i64), TradeError> {
        let out_of_range = || TradeError::share_count_out_of_range(self.shares.saturating_abs());

        let delta = self.cash_delta().ok_or_else(out_of_range)?;
        let new_cash = cash.checked_add(delta).ok_or_else(out_of_range)?;
        if new_cash < Decimal::ZERO {
            return Err(TradeError::InsufficientFunds {
                required: -delta,
                available: cash,
            });
        }

        let new_held = held.checked_add(self.shares).ok_or_else(out_of_range)?;
        if new_held < 0 {
            return Err(TradeError::InsufficientShares {
                symbol: self.symbol.clone(),
                requested: self.shares.saturating_neg(),
                held: held.max(0),
            });
        }

        Ok((new_cash, new_held))
    }

    /// Structural checks a ledger applies before writing.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "account_id".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.shares == 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trade share count cannot be zero".to_string(),
            )));
        }
        if self.price_per_share <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Price per share must be positive, got {}",
                self.price_per_share
            ))));
        }
        Ok(())
    }
}
