use rust_decimal::Decimal;
use thiserror::Error;

/// Expected outcomes that stop a trade before it reaches the ledger.
///
/// Every variant means "rejected, nothing written". The messages are meant to
/// be shown to the person who placed the order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("invalid share count: {0}")]
    InvalidShareCount(String),

    #[error("not enough funds: trade costs {required}, available cash is {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("not enough shares of {symbol}: requested {requested}, owned {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },
}

impl TradeError {
    /// Share count that parses but cannot be carried through the ledger
    /// arithmetic (position total or trade value out of range).
    pub fn share_count_out_of_range(shares: i64) -> Self {
        TradeError::InvalidShareCount(format!("{} shares is out of range", shares))
    }
}
