//! Read-side views over the ledger: holdings and valuation.

pub mod holdings;
pub mod valuation;
