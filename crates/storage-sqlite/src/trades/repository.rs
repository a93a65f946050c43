use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, warn};
use std::sync::Arc;

use papertrade_core::errors::{DatabaseError, Error, Result, ValidationError};
use papertrade_core::trades::{NewTrade, TradeRecord, TradeRepositoryTrait};

use super::model::{NewTradeDB, TradeDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{accounts, trades};
use crate::utils::{decimal_to_text, parse_decimal};

/// The transaction ledger over SQLite.
///
/// `append` runs on the writer actor inside `BEGIN IMMEDIATE`: it re-reads the
/// account's cash and its position in the symbol, refuses a write that would
/// leave either negative or out of range, then updates the balance and inserts
/// the row. Any failure rolls back both.
pub struct TradeRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn append_in_transaction(conn: &mut SqliteConnection, new_trade: NewTrade) -> Result<TradeRecord> {
    let stored_cash: String = accounts::table
        .find(&new_trade.account_id)
        .select(accounts::cash)
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Account {} not found",
                new_trade.account_id
            )))
        })?;
    let cash = parse_decimal(&stored_cash, "accounts.cash")?;

    let held = trades::table
        .filter(trades::account_id.eq(&new_trade.account_id))
        .filter(trades::symbol.eq(&new_trade.symbol))
        .select(trades::shares)
        .load::<i64>(conn)
        .into_core()?
        .into_iter()
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| {
            Error::Validation(ValidationError::Overflow(format!(
                "stored share total for {} on account {}",
                new_trade.symbol, new_trade.account_id
            )))
        })?;

    let (new_cash, _) = new_trade.settle(cash, held).map_err(|reason| {
        warn!(
            "Refusing trade on account {} (cash {}, holds {} {}): {}",
            new_trade.account_id, cash, held, new_trade.symbol, reason
        );
        Error::Trade(reason)
    })?;

    let now = chrono::Utc::now().naive_utc();
    diesel::update(accounts::table.find(&new_trade.account_id))
        .set((
            accounts::cash.eq(decimal_to_text(new_cash)),
            accounts::updated_at.eq(now),
        ))
        .execute(conn)
        .into_core()?;

    let inserted = diesel::insert_into(trades::table)
        .values(NewTradeDB::from_domain(&new_trade, now))
        .returning(TradeDB::as_returning())
        .get_result(conn)
        .into_core()?;

    debug!(
        "Ledger row #{} written, account {} cash {} -> {}",
        inserted.id, new_trade.account_id, cash, new_cash
    );
    Ok(TradeRecord::try_from(inserted)?)
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    async fn append(&self, new_trade: NewTrade) -> Result<TradeRecord> {
        new_trade.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| append_in_transaction(conn, new_trade))
            .await
    }

    fn query(&self, account_id: &str) -> Result<Vec<TradeRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = trades::table
            .filter(trades::account_id.eq(account_id))
            .order(trades::id.asc())
            .select(TradeDB::as_select())
            .load::<TradeDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| TradeRecord::try_from(row).map_err(Error::from))
            .collect()
    }
}
