//! Papertrade Core - ledger, holdings, trade validation and valuation.
//!
//! This crate contains the business logic of the paper-trading engine.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.
//!
//! ```text
//!            QuoteProvider (lookup, outside any lock)
//!                  │
//!                  ▼
//!  TradeProposal ─► TradeValidator ─► TransactionLedger.append (cash + trade, one unit)
//!                  ▲
//!                  │
//!         HoldingsAggregator (replays the ledger)
//! ```

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod trades;
pub mod trading;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
