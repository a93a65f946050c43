use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trades::{NewTrade, TradeSide};

/// A trade as submitted by a user, before any checks.
///
/// `symbol` and `shares` are raw input; both are parsed during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeProposal {
    pub account_id: String,
    pub side: TradeSide,
    pub symbol: String,
    pub shares: String,
}

impl TradeProposal {
    pub fn buy(account_id: &str, symbol: &str, shares: impl ToString) -> Self {
        Self {
            account_id: account_id.to_string(),
            side: TradeSide::Buy,
            symbol: symbol.to_string(),
            shares: shares.to_string(),
        }
    }

    pub fn sell(account_id: &str, symbol: &str, shares: impl ToString) -> Self {
        Self {
            account_id: account_id.to_string(),
            side: TradeSide::Sell,
            symbol: symbol.to_string(),
            shares: shares.to_string(),
        }
    }
}

/// Outcome of a passed validation: the signed delta and the money involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedTrade {
    pub account_id: String,
    pub symbol: String,
    pub side: TradeSide,
    /// Signed: `+n` for a buy, `-n` for a sell.
    pub share_delta: i64,
    pub price_per_share: Decimal,
    /// Cost of a buy or proceeds of a sell, always positive.
    pub total: Decimal,
}

impl ApprovedTrade {
    pub fn into_new_trade(self) -> NewTrade {
        NewTrade {
            account_id: self.account_id,
            symbol: self.symbol,
            shares: self.share_delta,
            price_per_share: self.price_per_share,
        }
    }
}
