//! Market data provider abstractions and implementations.
//!
//! The ledger only needs one capability from a provider: "what does this symbol
//! trade at right now". Everything provider-specific lives behind
//! [`MarketDataProvider`].

mod traits;

pub mod iex;

pub use traits::MarketDataProvider;
