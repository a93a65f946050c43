//! Text rendering of command results. JSON output goes through serde instead.

use std::fmt::Write;

use papertrade_core::{
    accounts::Account,
    portfolio::{holdings::Holding, valuation::PortfolioValuation},
    quotes::Quote,
    trades::TradeRecord,
    trading::LedgerAudit,
    utils::money::format_usd,
};

pub fn account(account: &Account) -> String {
    format!(
        "{}  {}  cash {}",
        account.id,
        account.name,
        format_usd(account.cash)
    )
}

pub fn accounts(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts registered.".to_string();
    }
    accounts.iter().map(account).collect::<Vec<_>>().join("\n")
}

pub fn quote(quote: &Quote) -> String {
    format!(
        "A share of {} ({}) costs {}.",
        quote.display_name(),
        quote.symbol,
        format_usd(quote.price)
    )
}

pub fn trade(record: &TradeRecord) -> String {
    let verb = if record.shares > 0 { "Bought" } else { "Sold" };
    format!(
        "{} {} {} at {} ({})",
        verb,
        record.shares.abs(),
        record.symbol,
        format_usd(record.price_per_share),
        record
            .gross_amount()
            .map(format_usd)
            .unwrap_or_else(|| "n/a".to_string())
    )
}

/// Sellable positions, one `SYMBOL  SHARES` line each.
pub fn holdings(holdings: &[Holding]) -> String {
    if holdings.is_empty() {
        return "No holdings.".to_string();
    }
    holdings
        .iter()
        .map(|h| format!("{:<8} {:>8}", h.symbol, h.shares))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history(records: &[TradeRecord]) -> String {
    if records.is_empty() {
        return "No trades yet.".to_string();
    }
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{:>5}  {:<8} {:>8} {:>14}  {}",
            record.id,
            record.symbol,
            record.shares,
            format_usd(record.price_per_share),
            record.executed_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    out.trim_end().to_string()
}

pub fn portfolio(valuation: &PortfolioValuation) -> String {
    let mut out = String::new();
    for holding in &valuation.holdings {
        let name = holding.name.as_deref().unwrap_or(&holding.symbol);
        let price = holding
            .price
            .map(format_usd)
            .unwrap_or_else(|| "n/a".to_string());
        let value = holding
            .market_value
            .map(format_usd)
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "{:<8} {:<24} {:>8} {:>14} {:>16}",
            holding.symbol, name, holding.shares, price, value
        );
    }
    let _ = writeln!(out, "{:<8} {:>64}", "CASH", format_usd(valuation.cash));
    let _ = write!(out, "{:<8} {:>64}", "TOTAL", format_usd(valuation.net_worth));
    if !valuation.is_complete() {
        let _ = write!(
            out,
            "\nNo quote for {}; excluded from total.",
            valuation.unpriced_symbols.join(", ")
        );
    }
    out
}

pub fn audit(audit: &LedgerAudit) -> String {
    let mut out = format!(
        "{} trades, recorded cash {}, replayed cash {}",
        audit.trade_count,
        format_usd(audit.recorded_cash),
        format_usd(audit.replayed_cash)
    );
    if audit.is_consistent() {
        out.push_str("\nLedger consistent.");
    } else {
        if let Some(id) = audit.first_violation {
            let _ = write!(out, "\nInvariant broken at trade {}.", id);
        }
        if !audit.ordered {
            out.push_str("\nTrade ids are out of order.");
        }
        if audit.recorded_cash != audit.replayed_cash {
            out.push_str("\nRecorded cash does not match the ledger.");
        }
    }
    out
}
