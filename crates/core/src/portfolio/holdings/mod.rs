//! Holdings aggregation.
//!
//! Holdings are never stored. They are recomputed from the full trade history
//! of an account on every call.

mod holdings_calculator;
mod holdings_model;
mod holdings_service;



pub use holdings_calculator::{aggregate_positions, apply_trade, compute_holdings, shares_held};
pub use holdings_model::Holding;
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
