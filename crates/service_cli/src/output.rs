//! Report rendering.

use std::io::Write;

use pricer_risk::{portfolio_total, PortfolioTotal, PortfolioValue, Sensitivity};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::Result;

const RULE: &str = "========================";

/// One named vector of per-trade values with its total.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBlock {
    /// Calculation name, e.g. `PV` or `PV01 bucketed IR.1Y.USD`
    pub name: String,
    /// Sum of the successful values and the failures
    pub total: PortfolioTotal,
    /// One value per trade
    pub values: Vec<PortfolioValue>,
}

impl ReportBlock {
    /// Block named `name` over `values`.
    pub fn new(name: impl Into<String>, values: Vec<PortfolioValue>) -> Self {
        Self {
            name: name.into(),
            total: portfolio_total(&values),
            values,
        }
    }

    /// One block per sensitivity, named `"{label} {key}"`.
    pub fn from_sensitivities(label: &str, sensitivities: Vec<Sensitivity>) -> Vec<Self> {
        sensitivities
            .into_iter()
            .map(|s| Self::new(format!("{} {}", label, s.key), s.values))
            .collect()
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    calculation: &'a str,
    trade: usize,
    value: Option<f64>,
    error: Option<&'a str>,
}

/// Writes `blocks` to `out` in `format`.
pub fn write_report(out: &mut dyn Write, format: OutputFormat, blocks: &[ReportBlock]) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for block in blocks {
                write_table_block(out, block)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, blocks)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for block in blocks {
                for (trade, v) in block.values.iter().enumerate() {
                    wtr.serialize(CsvRow {
                        calculation: &block.name,
                        trade,
                        value: v.is_ok().then_some(v.value),
                        error: v.error.as_deref(),
                    })?;
                }
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn write_table_block(out: &mut dyn Write, block: &ReportBlock) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}:", block.name)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total: {}", block.total.total)?;
    if !block.total.failures.is_empty() {
        writeln!(out, "Errors: {}", block.total.failures.len())?;
        for (i, msg) in &block.total.failures {
            writeln!(out, "  {:>3}: {}", i, msg)?;
        }
    }
    writeln!(out, "{}", RULE)?;
    for (i, v) in block.values.iter().enumerate() {
        match &v.error {
            None => writeln!(out, "{:>5}: {}", i, v.value)?,
            Some(msg) => writeln!(out, "{:>5}: NaN ({})", i, msg)?,
        }
    }
    writeln!(out, "{}\n", RULE)?;
    Ok(())
}
