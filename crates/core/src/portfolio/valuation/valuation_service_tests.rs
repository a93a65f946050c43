use super::*;
use crate::portfolio::holdings::HoldingsService;
use crate::quotes::{Quote, StaticQuoteProvider};
use crate::test_support::seeded_ledger;
use crate::trading::{AccountLocks, TradingService, TradingServiceTrait};
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_valuate_after_trades() {
    let (ledger, account) = seeded_ledger(dec!(10000.00));
    let quotes = Arc::new(StaticQuoteProvider::new());
    let locks = Arc::new(AccountLocks::new());
    let trading = TradingService::new(ledger.clone(), ledger.clone(), quotes.clone(), locks.clone());
    let valuation = ValuationService::new(
        ledger.clone(),
        Arc::new(HoldingsService::new(ledger.clone())),
        quotes.clone(),
        locks,
    );

    quotes.set_price("AAPL", dec!(50.00));
    quotes.set_price("MSFT", dec!(400.00));
    trading.buy(&account.id, "AAPL", 10).await.unwrap();
    trading.buy(&account.id, "MSFT", 1).await.unwrap();
    trading.sell(&account.id, "MSFT", 1).await.unwrap();

    quotes.set_quote(Quote::new("AAPL", dec!(55.00)).with_name("Apple Inc."));
    let report = valuation.valuate(&account.id).await.unwrap();

    assert_eq!(report.cash, dec!(9500.00));
    assert_eq!(report.holdings.len(), 1);
    assert_eq!(report.holdings[0].shares, 10);
    assert_eq!(report.holdings[0].market_value, Some(dec!(550.00)));
    assert_eq!(report.holdings_value, dec!(550.00));
    assert_eq!(report.net_worth, dec!(10050.00));
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_missing_quote_is_not_fatal() {
    let (ledger, account) = seeded_ledger(dec!(1000));
    let quotes = Arc::new(StaticQuoteProvider::new());
    let locks = Arc::new(AccountLocks::new());
    let trading = TradingService::new(ledger.clone(), ledger.clone(), quotes.clone(), locks.clone());
    let valuation = ValuationService::new(
        ledger.clone(),
        Arc::new(HoldingsService::new(ledger.clone())),
        quotes.clone(),
        locks,
    );

    quotes.set_price("AAPL", dec!(10));
    quotes.set_price("DELIST", dec!(5));
    trading.buy(&account.id, "AAPL", 10).await.unwrap();
    trading.buy(&account.id, "DELIST", 20).await.unwrap();
    quotes.remove("DELIST");

    let report = valuation.valuate(&account.id).await.unwrap();
    assert_eq!(report.cash, dec!(800));
    assert_eq!(report.net_worth, dec!(900));
    assert_eq!(report.unpriced_symbols, vec!["DELIST".to_string()]);
    let delisted = report.holdings.iter().find(|h| h.symbol == "DELIST").unwrap();
    assert_eq!(delisted.shares, 20);
    assert_eq!(delisted.market_value, None);
}

#[tokio::test]
async fn test_valuate_unknown_account() {
    let (ledger, _) = seeded_ledger(dec!(1000));
    let valuation = ValuationService::new(
        ledger.clone(),
        Arc::new(HoldingsService::new(ledger.clone())),
        Arc::new(StaticQuoteProvider::new()),
        Arc::new(AccountLocks::new()),
    );
    assert!(valuation.valuate("nobody").await.is_err());
}
