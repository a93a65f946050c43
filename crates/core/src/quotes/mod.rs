//! Quote lookup module.
//!
//! - [`model`] - the typed [`Quote`] value and symbol normalization
//! - [`provider`] - the [`QuoteProviderTrait`] seam plus a static, in-process provider
//! - [`client`] - adapter over the `market-data` crate's HTTP providers
//! - [`service`] - user-facing quote lookup
//!
//! ```text
//! QuoteService ─► QuoteProviderTrait ─┬─► StaticQuoteProvider
//!                                     └─► MarketDataQuoteProvider ─► market-data crate
//! ```
//!
//! A quote is never persisted. A provider answers `None` when the symbol
//! cannot be priced right now, whatever the reason.

pub mod client;
pub mod model;
pub mod provider;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use client::MarketDataQuoteProvider;
pub use model::{normalize_symbol, Quote};
pub use provider::{QuoteProviderTrait, StaticQuoteProvider};
pub use service::{QuoteService, QuoteServiceTrait};
