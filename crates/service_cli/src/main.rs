//! sensi - Portfolio Risk from the Command Line
//!
//! Prices a portfolio against flat-file market data and reports bucketed
//! PV01, parallel PV01 and FX delta.
//!
//! # Commands
//!
//! - `sensi risk -p <portfolio.json> -f <risk_factors.txt> [-x <fixings.txt>]` - Price and compute sensitivities
//! - `sensi create-portfolio <output.json>` - Write the demo portfolio
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the market cache
//! (`pricer_core`), trades and pricers (`pricer_models`) and the
//! sensitivity engine (`pricer_risk`) into a command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::RiskConfig;

/// Portfolio risk CLI
#[derive(Parser)]
#[command(name = "sensi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: sensi.toml, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a portfolio and compute PV01 and FX delta
    Risk(commands::risk::RiskArgs),

    /// Write the demo portfolio
    CreatePortfolio {
        /// Output file
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialise tracing on stderr so that reports on stdout stay parseable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Risk(args) => {
            let config = RiskConfig::load(cli.config.as_deref())?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            commands::risk::run(&args, config, &mut out)
        }
        Commands::CreatePortfolio { output } => commands::create_portfolio::run(&output),
    }
}
