//! Trading module - validation and the validate-then-commit pipeline.
//!
//! A trade moves `Proposed -> Validating -> Committed | Rejected`. Both end
//! states are terminal; a retry is a new proposal.

mod account_locks;
mod ledger_audit;
mod trade_validator;
mod trading_model;
mod trading_service;



#[cfg(test)]
mod trading_property_tests;

pub use account_locks::AccountLocks;
pub use ledger_audit::{audit_ledger, LedgerAudit};
pub use trade_validator::{parse_share_count, validate_buy, validate_sell};
pub use trading_model::{ApprovedTrade, TradeProposal};
pub use trading_service::{TradingService, TradingServiceTrait};
