mod cli;
mod commands;
mod config;
mod error;
mod main_lib;
mod render;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use error::CliError;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let state = build_state(&config)?;

    let output = commands::dispatch(cli, &state).await?;
    println!("{output}");
    Ok(())
}
