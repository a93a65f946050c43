//! Random buy/sell sequences must keep the ledger invariants.

use super::*;
use crate::portfolio::holdings::{aggregate_positions, compute_holdings};
use crate::quotes::StaticQuoteProvider;
use crate::test_support::seeded_ledger;
use crate::trades::TradeRepositoryTrait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

const SYMBOLS: [&str; 3] = ["AAPL", "MSFT", "GOOG"];

#[derive(Debug, Clone)]
struct Op {
    buy: bool,
    symbol: usize,
    shares: i64,
    price_cents: i64,
}

fn op() -> impl Strategy<Value = Op> {
    (any::<bool>(), 0..SYMBOLS.len(), 1i64..40, 1i64..50_000).prop_map(
        |(buy, symbol, shares, price_cents)| Op {
            buy,
            symbol,
            shares,
            price_cents,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_trading_keeps_ledger_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let initial = Decimal::new(1_000_000, 2);
            let (ledger, account) = seeded_ledger(initial);
            let quotes = Arc::new(StaticQuoteProvider::new());
            let trading = TradingService::new(
                ledger.clone(),
                ledger.clone(),
                quotes.clone(),
                Arc::new(AccountLocks::new()),
            );

            for op in &ops {
                let symbol = SYMBOLS[op.symbol];
                quotes.set_price(symbol, Decimal::new(op.price_cents, 2));
                let result = if op.buy {
                    trading.buy(&account.id, symbol, op.shares).await
                } else {
                    trading.sell(&account.id, symbol, op.shares).await
                };
                if let Err(e) = result {
                    prop_assert!(e.is_rejection(), "unexpected failure: {}", e);
                }

                let records = ledger.query(&account.id).unwrap();
                for shares in aggregate_positions(&records).unwrap().values() {
                    prop_assert!(*shares >= 0);
                }
                let spent: Decimal = records
                    .iter()
                    .map(|r| Decimal::from(r.shares) * r.price_per_share)
                    .sum();
                prop_assert_eq!(ledger.cash(&account.id), initial - spent);
                prop_assert!(ledger.cash(&account.id) >= Decimal::ZERO);
            }

            let records = ledger.query(&account.id).unwrap();
            prop_assert_eq!(
                compute_holdings(&records).unwrap(),
                compute_holdings(&records).unwrap()
            );
            prop_assert!(trading.audit_account(&account.id).await.unwrap().is_consistent());
            Ok(())
        })?;
    }
}
