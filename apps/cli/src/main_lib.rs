use std::sync::Arc;

use papertrade_core::{
    accounts::{AccountService, AccountServiceTrait},
    portfolio::{
        holdings::{HoldingsService, HoldingsServiceTrait},
        valuation::{ValuationService, ValuationServiceTrait},
    },
    quotes::{
        MarketDataQuoteProvider, QuoteProviderTrait, QuoteService, QuoteServiceTrait,
        StaticQuoteProvider,
    },
    trading::{AccountLocks, TradingService, TradingServiceTrait},
};
use papertrade_market_data::IexProvider;
use papertrade_storage_sqlite::{
    accounts::AccountRepository,
    db::{self, write_actor},
    trades::TradeRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat, QuoteSource};
use crate::error::CliError;

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub trading_service: Arc<dyn TradingServiceTrait>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// bridged in by `init()`.
pub fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_quote_provider(
    source: &QuoteSource,
) -> Result<Arc<dyn QuoteProviderTrait>, CliError> {
    let provider: Arc<dyn QuoteProviderTrait> = match source {
        QuoteSource::Iex { base_url, api_key } => {
            tracing::info!("Using IEX-compatible quotes from {}", base_url);
            Arc::new(MarketDataQuoteProvider::new(Arc::new(IexProvider::new(
                base_url.as_str(),
                api_key.as_str(),
            ))))
        }
        QuoteSource::Static(table) => {
            tracing::info!("Using static quote table");
            Arc::new(StaticQuoteProvider::from_table(table)?)
        }
    };
    Ok(provider)
}

/// Opens the ledger database and wires the services. Must run inside a Tokio
/// runtime, the write actor is spawned on it.
pub fn build_state(config: &Config) -> Result<AppState, CliError> {
    let quote_provider = build_quote_provider(&config.quote_source)?;

    let db_path = db::init(&config.db_path)?;
    tracing::debug!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let trade_repo = Arc::new(TradeRepository::new(pool.clone(), writer));
    let account_locks = Arc::new(AccountLocks::new());

    let account_service = Arc::new(AccountService::new(
        account_repo.clone(),
        config.initial_cash,
    ));
    let holdings_service: Arc<dyn HoldingsServiceTrait> =
        Arc::new(HoldingsService::new(trade_repo.clone()));
    let trading_service = Arc::new(TradingService::new(
        account_repo.clone(),
        trade_repo,
        quote_provider.clone(),
        account_locks.clone(),
    ));
    let valuation_service = Arc::new(ValuationService::new(
        account_repo,
        holdings_service.clone(),
        quote_provider.clone(),
        account_locks,
    ));
    let quote_service = Arc::new(QuoteService::new(quote_provider));

    Ok(AppState {
        account_service,
        trading_service,
        holdings_service,
        valuation_service,
        quote_service,
    })
}
