use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for registering and reading accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    default_initial_cash: Decimal,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>, default_initial_cash: Decimal) -> Self {
        Self {
            repository,
            default_initial_cash,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let resolved = NewAccount {
            initial_cash: Some(
                new_account
                    .initial_cash
                    .unwrap_or(self.default_initial_cash),
            ),
            ..new_account
        };
        resolved.validate()?;
        debug!(
            "Creating account '{}' with opening cash {:?}",
            resolved.name, resolved.initial_cash
        );

        let account = self.repository.create(resolved).await?;
        info!("Registered account {} ({})", account.id, account.name);
        Ok(account)
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list()
    }
}
