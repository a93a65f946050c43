//! Trades module - the append-only transaction ledger.
//!
//! A [`TradeRecord`] is never edited or removed once committed. Corrections are
//! new, offsetting records.

mod trades_errors;
mod trades_model;
mod trades_traits;


pub use trades_errors::TradeError;
pub use trades_model::{NewTrade, TradeRecord, TradeSide};
pub use trades_traits::TradeRepositoryTrait;
