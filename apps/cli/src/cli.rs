use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Root CLI parser for papertrade.
#[derive(Debug, Parser)]
#[command(
    name = "papertrade",
    version,
    about = "Paper-trading ledger: simulated buys and sells against live quotes"
)]
pub struct Cli {
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new account.
    Register(RegisterArgs),

    /// List registered accounts.
    Accounts,

    /// Look up the current quote for a symbol.
    Quote(QuoteArgs),

    /// Buy shares at the current quote.
    Buy(TradeArgs),

    /// Sell shares at the current quote.
    Sell(TradeArgs),

    /// Show cash, holdings and net worth.
    Portfolio(AccountArgs),

    /// List the symbols the account can sell, with share counts.
    Holdings(AccountArgs),

    /// Show the full trade history, oldest first.
    History(AccountArgs),

    /// Replay the ledger and check it against the stored balance.
    Audit(AccountArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Unique account name.
    pub name: String,

    /// Opening cash; defaults to PAPERTRADE_INITIAL_CASH.
    #[arg(long)]
    pub cash: Option<Decimal>,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct TradeArgs {
    /// Account id.
    pub account: String,

    pub symbol: String,

    /// Whole number of shares. Kept as text so the ledger reports bad counts itself.
    #[arg(allow_hyphen_values = true)]
    pub shares: String,
}

#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account id.
    pub account: String,
}
