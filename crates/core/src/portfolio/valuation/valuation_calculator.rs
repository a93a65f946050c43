use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::valuation_model::{HoldingValuation, PortfolioValuation};
use crate::errors::{Error, Result, ValidationError};
use crate::quotes::Quote;

fn value_overflow(account_id: &str) -> Error {
    Error::Validation(ValidationError::Overflow(format!(
        "portfolio value of account {} is out of range",
        account_id
    )))
}

/// Combines cash, active holdings and whatever quotes were obtained.
///
/// A holding without a quote is listed with unknown value and does not count
/// toward net worth.
pub fn calculate_valuation(
    account_id: &str,
    cash: Decimal,
    holdings: &BTreeMap<String, i64>,
    quotes: &HashMap<String, Quote>,
    valued_at: DateTime<Utc>,
) -> Result<PortfolioValuation> {
    let mut holdings_value = Decimal::ZERO;
    let mut unpriced_symbols = Vec::new();
    let mut valued = Vec::with_capacity(holdings.len());

    for (symbol, &shares) in holdings {
        let quote = quotes.get(symbol);
        let price = quote.map(|q| q.price);
        let market_value = match price {
            Some(p) => {
                let value = Decimal::from(shares)
                    .checked_mul(p)
                    .ok_or_else(|| value_overflow(account_id))?;
                holdings_value = holdings_value
                    .checked_add(value)
                    .ok_or_else(|| value_overflow(account_id))?;
                Some(value)
            }
            None => {
                unpriced_symbols.push(symbol.clone());
                None
            }
        };
        valued.push(HoldingValuation {
            symbol: symbol.clone(),
            name: quote.and_then(|q| q.name.clone()),
            shares,
            price,
            market_value,
        });
    }

    let net_worth = cash
        .checked_add(holdings_value)
        .ok_or_else(|| value_overflow(account_id))?;

    Ok(PortfolioValuation {
        account_id: account_id.to_string(),
        cash,
        holdings: valued,
        holdings_value,
        net_worth,
        unpriced_symbols,
        valued_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_priced_and_unpriced_holdings() {
        let holdings: BTreeMap<String, i64> =
            [("AAPL".to_string(), 5), ("ZZZZ".to_string(), 3)].into_iter().collect();
        let quotes: HashMap<String, Quote> = [(
            "AAPL".to_string(),
            Quote::new("AAPL", dec!(60.00)).with_name("Apple Inc."),
        )]
        .into_iter()
        .collect();

        let valuation =
            calculate_valuation("acc-1", dec!(9800.00), &holdings, &quotes, Utc::now()).unwrap();

        assert_eq!(valuation.holdings_value, dec!(300.00));
        assert_eq!(valuation.net_worth, dec!(10100.00));
        assert_eq!(valuation.unpriced_symbols, vec!["ZZZZ".to_string()]);
        assert!(!valuation.is_complete());

        let aapl = &valuation.holdings[0];
        assert_eq!(aapl.name.as_deref(), Some("Apple Inc."));
        assert_eq!(aapl.market_value, Some(dec!(300.00)));
        let zzzz = &valuation.holdings[1];
        assert_eq!(zzzz.price, None);
        assert_eq!(zzzz.market_value, None);
    }

    #[test]
    fn test_cash_only() {
        let valuation = calculate_valuation(
            "acc-1",
            dec!(123.45),
            &BTreeMap::new(),
            &HashMap::new(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(valuation.net_worth, dec!(123.45));
        assert!(valuation.holdings.is_empty());
        assert!(valuation.is_complete());
    }

    #[test]
    fn test_out_of_range_value_is_an_error() {
        let holdings: BTreeMap<String, i64> = [("AAPL".to_string(), 2)].into_iter().collect();
        let quotes: HashMap<String, Quote> =
            [("AAPL".to_string(), Quote::new("AAPL", Decimal::MAX))]
                .into_iter()
                .collect();

        let err =
            calculate_valuation("acc-1", dec!(1), &holdings, &quotes, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Overflow(_))
        ));
    }
}
