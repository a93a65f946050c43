use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::holdings::apply_trade;
use crate::trades::TradeRecord;

/// Result of replaying an account's ledger from its opening cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAudit {
    pub account_id: String,
    pub trade_count: usize,
    pub initial_cash: Decimal,
    /// Balance stored on the account.
    pub recorded_cash: Decimal,
    /// `initial_cash - sum(shares * price)` over the ledger.
    pub replayed_cash: Decimal,
    /// Final aggregate of every symbol ever traded, flat ones included.
    pub positions: BTreeMap<String, i64>,
    /// First trade id after which cash or a position went negative.
    pub first_violation: Option<i64>,
    /// False if sequence ids are not strictly increasing.
    pub ordered: bool,
}

impl LedgerAudit {
    pub fn is_consistent(&self) -> bool {
        self.ordered && self.first_violation.is_none() && self.recorded_cash == self.replayed_cash
    }
}

/// Replays `records` (as returned by the ledger) against `account`.
///
/// Fails only when the replay itself leaves the numeric range.
pub fn audit_ledger(account: &Account, records: &[TradeRecord]) -> Result<LedgerAudit> {
    let mut cash = account.initial_cash;
    let mut positions: BTreeMap<String, i64> = BTreeMap::new();
    let mut first_violation = None;
    let mut ordered = true;
    let mut last_id: Option<i64> = None;

    for record in records {
        if last_id.is_some_and(|last| record.id <= last) {
            ordered = false;
        }
        last_id = Some(record.id);

        cash = record
            .cash_delta()
            .and_then(|delta| cash.checked_add(delta))
            .ok_or_else(|| {
                Error::Validation(ValidationError::Overflow(format!(
                    "cash replay of account {} at trade {}",
                    account.id, record.id
                )))
            })?;
        let position = apply_trade(&mut positions, record)?;

        if first_violation.is_none() && (cash < Decimal::ZERO || position < 0) {
            first_violation = Some(record.id);
        }
    }

    Ok(LedgerAudit {
        account_id: account.id.clone(),
        trade_count: records.len(),
        initial_cash: account.initial_cash,
        recorded_cash: account.cash,
        replayed_cash: cash,
        positions,
        first_violation,
        ordered,
    })
}
