//! Database models for trades.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::trades::{NewTrade, TradeRecord};

use crate::errors::StorageError;
use crate::utils::{decimal_to_text, parse_decimal};

/// A committed ledger row.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: i64,
    pub account_id: String,
    pub symbol: String,
    pub shares: i64,
    pub price_per_share: String,
    pub executed_at: NaiveDateTime,
}

/// Insert form; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
pub struct NewTradeDB {
    pub account_id: String,
    pub symbol: String,
    pub shares: i64,
    pub price_per_share: String,
    pub executed_at: NaiveDateTime,
}

impl NewTradeDB {
    pub fn from_domain(trade: &NewTrade, executed_at: NaiveDateTime) -> Self {
        Self {
            account_id: trade.account_id.clone(),
            symbol: trade.symbol.clone(),
            shares: trade.shares,
            price_per_share: decimal_to_text(trade.price_per_share),
            executed_at,
        }
    }
}

impl TryFrom<TradeDB> for TradeRecord {
    type Error = StorageError;

    fn try_from(db: TradeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            price_per_share: parse_decimal(&db.price_per_share, "trades.price_per_share")?,
            id: db.id,
            account_id: db.account_id,
            symbol: db.symbol,
            shares: db.shares,
            executed_at: db.executed_at.and_utc(),
        })
    }
}
