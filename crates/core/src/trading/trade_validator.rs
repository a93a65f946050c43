//! Trade gatekeeping.
//!
//! The validators are pure: they look only at the values handed to them. The
//! caller is responsible for handing them a consistent snapshot, which
//! `TradingService` does by holding the account lock from the read through
//! the commit.

use log::debug;
use rust_decimal::Decimal;

use super::trading_model::ApprovedTrade;
use crate::accounts::Account;
use crate::quotes::Quote;
use crate::trades::{TradeError, TradeSide};

/// Parses a user-entered share count. Only positive whole numbers pass.
pub fn parse_share_count(raw: &str) -> Result<i64, TradeError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(shares) if shares > 0 => Ok(shares),
        _ => Err(TradeError::InvalidShareCount(format!(
            "'{}' is not a positive whole number",
            trimmed
        ))),
    }
}

fn require_quote<'a>(symbol: &str, quote: Option<&'a Quote>) -> Result<&'a Quote, TradeError> {
    quote.ok_or_else(|| TradeError::InvalidSymbol(symbol.to_string()))
}

fn require_positive(requested_shares: i64) -> Result<(), TradeError> {
    if requested_shares <= 0 {
        return Err(TradeError::InvalidShareCount(format!(
            "'{}' is not a positive whole number",
            requested_shares
        )));
    }
    Ok(())
}

/// Checks a buy of `requested_shares` of `symbol` at the quoted price.
///
/// Rejections, in order: no quote, non-positive share count, cost above cash.
pub fn validate_buy(
    account: &Account,
    symbol: &str,
    requested_shares: i64,
    quote: Option<&Quote>,
) -> Result<ApprovedTrade, TradeError> {
    let quote = require_quote(symbol, quote)?;
    require_positive(requested_shares)?;

    let cost = Decimal::from(requested_shares)
        .checked_mul(quote.price)
        .unwrap_or(Decimal::MAX);
    if !account.can_afford(cost) {
        debug!(
            "Buy of {} {} rejected for {}: cost {} > cash {}",
            requested_shares, symbol, account.id, cost, account.cash
        );
        return Err(TradeError::InsufficientFunds {
            required: cost,
            available: account.cash,
        });
    }

    Ok(ApprovedTrade {
        account_id: account.id.clone(),
        symbol: symbol.to_string(),
        side: TradeSide::Buy,
        share_delta: requested_shares,
        price_per_share: quote.price,
        total: cost,
    })
}

/// Checks a sell of `requested_shares` of `symbol` against `held_shares`,
/// the account's current aggregate for the symbol.
///
/// Rejections, in order: no quote, non-positive share count, not enough
/// shares, proceeds out of range. A symbol that was held and sold out is
/// treated like one never held.
pub fn validate_sell(
    account: &Account,
    symbol: &str,
    requested_shares: i64,
    quote: Option<&Quote>,
    held_shares: i64,
) -> Result<ApprovedTrade, TradeError> {
    let quote = require_quote(symbol, quote)?;
    require_positive(requested_shares)?;

    if held_shares <= 0 || held_shares < requested_shares {
        debug!(
            "Sell of {} {} rejected for {}: holds {}",
            requested_shares, symbol, account.id, held_shares
        );
        return Err(TradeError::InsufficientShares {
            symbol: symbol.to_string(),
            requested: requested_shares,
            held: held_shares.max(0),
        });
    }

    // Proceeds must fit, and so must the balance they are credited to.
    let proceeds = Decimal::from(requested_shares)
        .checked_mul(quote.price)
        .filter(|p| account.cash.checked_add(*p).is_some())
        .ok_or_else(|| {
            debug!(
                "Sell of {} {} rejected for {}: proceeds overflow",
                requested_shares, symbol, account.id
            );
            TradeError::share_count_out_of_range(requested_shares)
        })?;

    Ok(ApprovedTrade {
        account_id: account.id.clone(),
        symbol: symbol.to_string(),
        side: TradeSide::Sell,
        share_delta: -requested_shares,
        price_per_share: quote.price,
        total: proceeds,
    })
}
