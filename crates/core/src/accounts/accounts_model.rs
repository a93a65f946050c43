//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_INITIAL_CASH;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a trading account.
///
/// `cash` is only ever changed by a committed trade. `initial_cash` is kept so
/// the balance can be checked against a replay of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub cash: Decimal,
    pub initial_cash: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// True when the account can pay `amount` out of cash.
    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.cash >= amount
    }
}

/// Input model for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Opening cash; `None` means "use the configured default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cash: Option<Decimal>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            initial_cash: None,
        }
    }

    pub fn with_initial_cash(mut self, initial_cash: Decimal) -> Self {
        self.initial_cash = Some(initial_cash);
        self
    }

    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if let Some(cash) = self.initial_cash {
            if cash < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Initial cash cannot be negative".to_string(),
                )));
            }
            if cash > MAX_INITIAL_CASH {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Initial cash cannot exceed {}",
                    MAX_INITIAL_CASH
                ))));
            }
        }
        Ok(())
    }
}
