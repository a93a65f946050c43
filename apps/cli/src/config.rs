use std::str::FromStr;

use papertrade_core::constants::{DEFAULT_INITIAL_CASH, MAX_INITIAL_CASH};
use papertrade_market_data::provider::iex::DEFAULT_BASE_URL;
use rust_decimal::Decimal;

use crate::error::CliError;

const DEFAULT_DB_PATH: &str = "./data/papertrade.db";

/// Where live prices come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteSource {
    Iex { base_url: String, api_key: String },
    /// Fixed table of `SYM=PRICE` pairs.
    Static(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub initial_cash: Decimal,
    pub quote_source: QuoteSource,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys take their default;
    /// set but invalid values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = get("PAPERTRADE_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let initial_cash = match get("PAPERTRADE_INITIAL_CASH") {
            Some(raw) => {
                let cash = Decimal::from_str(&raw).map_err(|e| {
                    CliError::Config(format!("PAPERTRADE_INITIAL_CASH '{}': {}", raw, e))
                })?;
                if cash < Decimal::ZERO || cash > MAX_INITIAL_CASH {
                    return Err(CliError::Config(format!(
                        "PAPERTRADE_INITIAL_CASH must be between 0 and {}",
                        MAX_INITIAL_CASH
                    )));
                }
                cash
            }
            None => DEFAULT_INITIAL_CASH,
        };

        let provider = get("PAPERTRADE_QUOTE_PROVIDER").unwrap_or_else(|| "iex".to_string());
        let quote_source = match provider.to_ascii_lowercase().as_str() {
            "iex" => {
                let api_key = get("PAPERTRADE_QUOTE_API_KEY").ok_or_else(|| {
                    CliError::Config(
                        "PAPERTRADE_QUOTE_API_KEY is required for the iex provider".to_string(),
                    )
                })?;
                QuoteSource::Iex {
                    base_url: get("PAPERTRADE_QUOTE_API_URL")
                        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                    api_key,
                }
            }
            "static" => QuoteSource::Static(get("PAPERTRADE_STATIC_QUOTES").unwrap_or_default()),
            other => {
                return Err(CliError::Config(format!(
                    "PAPERTRADE_QUOTE_PROVIDER must be 'iex' or 'static', got '{}'",
                    other
                )))
            }
        };

        let log_format = match get("PAPERTRADE_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) => {
                return Err(CliError::Config(format!(
                    "PAPERTRADE_LOG_FORMAT must be 'text' or 'json', got '{}'",
                    raw
                )))
            }
        };

        Ok(Self {
            db_path,
            initial_cash,
            quote_source,
            log_format,
        })
    }
}
