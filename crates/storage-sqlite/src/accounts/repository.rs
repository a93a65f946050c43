use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use papertrade_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use papertrade_core::errors::{DatabaseError, Error, Result, ValidationError};

use super::model::AccountDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::utils::decimal_to_text;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let initial_cash = new_account.initial_cash.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("initial_cash".to_string()))
        })?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let now = chrono::Utc::now().naive_utc();
                let account_db = AccountDB {
                    id: new_account
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_account.name.trim().to_string(),
                    cash: decimal_to_text(initial_cash),
                    initial_cash: decimal_to_text(initial_cash),
                    created_at: now,
                    updated_at: now,
                };

                let inserted = diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                info!("Inserted account {}", inserted.id);
                Ok(Account::try_from(inserted)?)
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts::table
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Account {} not found",
                    account_id
                )))
            })?;

        Ok(Account::try_from(account)?)
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = accounts::table
            .select(AccountDB::as_select())
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| Account::try_from(row).map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::errors::StorageError;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (AccountRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = crate::db::init(&db_path.to_string_lossy()).unwrap();

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (AccountRepository::new(pool, writer), temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo
            .create(NewAccount::new("alice").with_initial_cash(dec!(10000.00)))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.cash, dec!(10000.00));
        assert_eq!(created.initial_cash, dec!(10000.00));

        let fetched = repo.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let (repo, _dir) = create_test_repository().await;
        repo.create(NewAccount::new("alice").with_initial_cash(dec!(1)))
            .await
            .unwrap();
        let err = repo
            .create(NewAccount::new("alice").with_initial_cash(dec!(2)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_unresolved_opening_cash_is_rejected() {
        let (repo, _dir) = create_test_repository().await;
        let err = repo.create(NewAccount::new("alice")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let (repo, _dir) = create_test_repository().await;
        for name in ["carol", "alice", "bob"] {
            repo.create(NewAccount::new(name).with_initial_cash(dec!(5)))
                .await
                .unwrap();
        }
        let names: Vec<String> = repo.list().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_missing_account() {
        let (repo, _dir) = create_test_repository().await;
        let err = repo.get_by_id("nope").unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_cash_is_reported() {
        let now = chrono::Utc::now().naive_utc();
        let row = AccountDB {
            id: "a".to_string(),
            name: "alice".to_string(),
            cash: "lots".to_string(),
            initial_cash: "1".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            Account::try_from(row),
            Err(StorageError::CorruptValue(_))
        ));
    }
}
