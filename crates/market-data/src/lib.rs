//! Papertrade Market Data Crate
//!
//! Provider-agnostic access to live equity quotes for the papertrade ledger.
//!
//! # Overview
//!
//! ```text
//! +------------------+      +----------------------+      +-------------+
//! |  papertrade-core | ---> |  MarketDataProvider  | ---> | LatestQuote |
//! +------------------+      +----------------------+      +-------------+
//!                                      |
//!                                      v
//!                           IexProvider (HTTP, IEX-compatible)
//! ```
//!
//! Providers only fetch. They never retry and never cache: the ledger asks for a
//! fresh price for every validation and every valuation.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::LatestQuote;
pub use provider::iex::IexProvider;
pub use provider::MarketDataProvider;
