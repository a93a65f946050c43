use std::collections::BTreeMap;

use crate::errors::{Error, Result, ValidationError};
use crate::trades::TradeRecord;

fn position_overflow(symbol: &str) -> Error {
    Error::Validation(ValidationError::Overflow(format!(
        "share total for {} is out of range",
        symbol
    )))
}

/// Adds `record` to its symbol's running total in `positions` and returns
/// the new total.
pub fn apply_trade(positions: &mut BTreeMap<String, i64>, record: &TradeRecord) -> Result<i64> {
    let position = positions.entry(record.symbol.clone()).or_insert(0);
    *position = position
        .checked_add(record.shares)
        .ok_or_else(|| position_overflow(&record.symbol))?;
    Ok(*position)
}

/// Signed share total per symbol over `records`, including flat and
/// (for a corrupted ledger) negative positions.
pub fn aggregate_positions(records: &[TradeRecord]) -> Result<BTreeMap<String, i64>> {
    let mut positions = BTreeMap::new();
    for record in records {
        apply_trade(&mut positions, record)?;
    }
    Ok(positions)
}

/// Active holdings: symbols whose aggregate is strictly positive.
///
/// Pure and deterministic; the map is ordered by symbol.
pub fn compute_holdings(records: &[TradeRecord]) -> Result<BTreeMap<String, i64>> {
    let mut holdings = aggregate_positions(records)?;
    holdings.retain(|_, shares| *shares > 0);
    Ok(holdings)
}

/// Aggregate share count for one symbol. A never-traded symbol is 0.
pub fn shares_held(records: &[TradeRecord], symbol: &str) -> Result<i64> {
    records
        .iter()
        .filter(|r| r.symbol == symbol)
        .try_fold(0i64, |total, r| total.checked_add(r.shares))
        .ok_or_else(|| position_overflow(symbol))
}
