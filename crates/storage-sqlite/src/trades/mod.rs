//! SQLite storage implementation for the trade ledger.

mod model;
mod repository;

pub use model::{NewTradeDB, TradeDB};
pub use repository::TradeRepository;
