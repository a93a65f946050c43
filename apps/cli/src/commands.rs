use papertrade_core::{
    accounts::{AccountServiceTrait, NewAccount},
    portfolio::{holdings::HoldingsServiceTrait, valuation::ValuationServiceTrait},
    quotes::QuoteServiceTrait,
    trading::{TradeProposal, TradingServiceTrait},
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::main_lib::AppState;
use crate::render;

fn output<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

/// Runs one command and returns what should be printed on stdout.
pub async fn dispatch(cli: Cli, state: &AppState) -> Result<String, CliError> {
    let json = cli.json;
    match cli.command {
        Command::Register(args) => {
            let mut new_account = NewAccount::new(args.name);
            if let Some(cash) = args.cash {
                new_account = new_account.with_initial_cash(cash);
            }
            let account = state.account_service.create_account(new_account).await?;
            output(json, &account, render::account)
        }
        Command::Accounts => {
            let accounts = state.account_service.list_accounts()?;
            output(json, &accounts, |a| render::accounts(a))
        }
        Command::Quote(args) => {
            let quote = state.quote_service.get_quote(&args.symbol).await?;
            output(json, &quote, render::quote)
        }
        Command::Buy(args) => {
            let proposal = TradeProposal::buy(&args.account, &args.symbol, args.shares);
            let record = state.trading_service.submit(proposal).await?;
            output(json, &record, render::trade)
        }
        Command::Sell(args) => {
            let proposal = TradeProposal::sell(&args.account, &args.symbol, args.shares);
            let record = state.trading_service.submit(proposal).await?;
            output(json, &record, render::trade)
        }
        Command::Portfolio(args) => {
            let valuation = state.valuation_service.valuate(&args.account).await?;
            output(json, &valuation, render::portfolio)
        }
        Command::Holdings(args) => {
            let account = state.account_service.get_account(&args.account)?;
            let holdings = state.holdings_service.list_holdings(&account.id)?;
            output(json, &holdings, |h| render::holdings(h))
        }
        Command::History(args) => {
            let records = state.trading_service.history(&args.account)?;
            output(json, &records, |r| render::history(r))
        }
        Command::Audit(args) => {
            let audit = state.trading_service.audit_account(&args.account).await?;
            output(json, &audit, render::audit)
        }
    }
}
