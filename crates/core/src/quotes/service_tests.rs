use super::*;
use crate::errors::{Error, TradeError};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn service() -> QuoteService {
    let provider = StaticQuoteProvider::new();
    provider.set_quote(Quote::new("AAPL", dec!(50.00)).with_name("Apple Inc."));
    QuoteService::new(Arc::new(provider))
}

#[tokio::test]
async fn test_get_quote_normalizes_input() {
    let quote = service().get_quote("  aapl ").await.unwrap();
    assert_eq!(quote.symbol, "AAPL");
    assert_eq!(quote.price, dec!(50.00));
    assert_eq!(quote.name.as_deref(), Some("Apple Inc."));
}

#[tokio::test]
async fn test_unknown_symbol_is_invalid_symbol() {
    let err = service().get_quote("zzzz").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Trade(TradeError::InvalidSymbol(ref s)) if s == "zzzz"
    ));
}

#[tokio::test]
async fn test_malformed_symbol_is_invalid_symbol() {
    let err = service().get_quote("").await.unwrap_err();
    assert!(matches!(err, Error::Trade(TradeError::InvalidSymbol(_))));

    let err = service().find_quote("A;B").await.unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn test_find_quote_unpriced_is_none() {
    assert!(service().find_quote("MSFT").await.unwrap().is_none());
}
