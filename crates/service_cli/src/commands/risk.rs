//! Risk command implementation
//!
//! Loads a portfolio and market data, prices the portfolio and reports
//! bucketed PV01, parallel PV01 and FX delta.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use pricer_core::market_data::names::RiskFactorName;
use pricer_core::market_data::{FixingDataServer, Market, RiskFactorStore};
use pricer_core::types::{Currency, Date};
use pricer_models::trades::{get_pricers, load_portfolio, save_portfolio, Portfolio};
use pricer_risk::{compute_prices, SensitivityEngine};
use tracing::info;

use crate::config::{OutputFormat, RiskConfig};
use crate::output::{write_report, ReportBlock};
use crate::Result;

/// Arguments of `sensi risk`.
#[derive(Debug, Clone, Args)]
pub struct RiskArgs {
    /// Portfolio file (JSON)
    #[arg(short, long)]
    pub portfolio: PathBuf,

    /// Risk-factor file (`name value` per line)
    #[arg(short = 'f', long)]
    pub risk_factors: PathBuf,

    /// Fixing file (`name YYYYMMDD value` per line)
    #[arg(short = 'x', long)]
    pub fixings: Option<PathBuf>,

    /// Pricing date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<Date>,

    /// Reporting currency
    #[arg(short, long)]
    pub base_ccy: Option<Currency>,

    /// Absolute zero-rate bump
    #[arg(long)]
    pub ir_bump: Option<f64>,

    /// Relative FX spot bump
    #[arg(long)]
    pub fx_bump: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl RiskArgs {
    /// `config` with every flag given on the command line applied.
    pub fn apply(&self, mut config: RiskConfig) -> RiskConfig {
        if let Some(date) = self.date {
            config.pricing_date = date;
        }
        if let Some(ccy) = self.base_ccy {
            config.base_currency = ccy;
        }
        if let Some(bump) = self.ir_bump {
            config.ir_bump_size = bump;
        }
        if let Some(bump) = self.fx_bump {
            config.fx_relative_bump = bump;
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        config
    }
}

/// Run the risk command, writing the report to `out`.
pub fn run(args: &RiskArgs, config: RiskConfig, out: &mut dyn Write) -> Result<()> {
    let config = args.apply(config);
    config.validate()?;
    let format = config.output_format;

    info!("Starting risk run...");
    info!("  Portfolio: {}", args.portfolio.display());
    info!("  Risk factors: {}", args.risk_factors.display());
    info!("  Date: {}", config.pricing_date);
    info!("  Base currency: {}", config.base_currency);
    info!("  Output format: {}", format);

    let portfolio = reload(load_portfolio(&args.portfolio)?)?;
    if format == OutputFormat::Table {
        for trade in &portfolio {
            writeln!(out, "{}", trade)?;
        }
    }
    let pricers = get_pricers(&portfolio, config.base_currency);

    let store = Arc::new(RiskFactorStore::from_file(&args.risk_factors)?);
    let fixings = args
        .fixings
        .as_ref()
        .map(FixingDataServer::from_file)
        .transpose()?;
    let mut market = Market::new(Arc::clone(&store), config.pricing_date);

    // Curves are built on demand while pricing
    let mut blocks = vec![ReportBlock::new(
        "PV",
        compute_prices(&pricers, &mut market, fixings.as_ref()),
    )];

    // Cache every stored risk factor so that the bump sets cover the whole market
    let relevant: BTreeSet<Currency> = pricers
        .iter()
        .flat_map(|p| p.currencies())
        .chain(std::iter::once(config.base_currency))
        .collect();
    let mut listed = Vec::new();
    for (name, _) in store.iter() {
        market.get_value(name)?;
        if RiskFactorName::parse(name).is_some_and(|rf| relevant.contains(&rf.currency())) {
            listed.push(name);
        }
    }
    if format == OutputFormat::Table {
        writeln!(out, "Risk factors:")?;
        for name in listed {
            writeln!(out, "{}", name)?;
        }
        writeln!(out)?;
    }

    let engine = SensitivityEngine::new(&pricers, fixings.as_ref(), config.sensitivity_config())?;
    blocks.extend(ReportBlock::from_sensitivities(
        "PV01 bucketed",
        engine.pv01_bucketed(&market)?,
    ));
    blocks.extend(ReportBlock::from_sensitivities(
        "PV01 parallel",
        engine.pv01_parallel(&market)?,
    ));
    blocks.extend(ReportBlock::from_sensitivities(
        "FX delta",
        engine.fx_delta(&market)?,
    ));

    write_report(out, format, &blocks)?;

    market.disconnect();
    info!(calculations = blocks.len(), "Risk run complete");
    Ok(())
}

/// Saves and reloads `portfolio` through a scratch file.
fn reload(portfolio: Portfolio) -> Result<Portfolio> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("portfolio.json");
    save_portfolio(&path, &portfolio)?;
    let reloaded = load_portfolio(&path)?;
    tracing::debug!(trades = reloaded.len(), "Portfolio round trip complete");
    Ok(reloaded)
}
