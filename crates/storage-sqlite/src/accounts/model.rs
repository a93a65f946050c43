//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::accounts::Account;

use crate::errors::StorageError;
use crate::utils::parse_decimal;

/// Database model for accounts. Money columns are TEXT.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub cash: String,
    pub initial_cash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = StorageError;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            cash: parse_decimal(&db.cash, "accounts.cash")?,
            initial_cash: parse_decimal(&db.initial_cash, "accounts.initial_cash")?,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
