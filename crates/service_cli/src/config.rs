//! Run configuration.
//!
//! Loaded from an optional TOML file; command-line flags override it.
//!
//! ```toml
//! pricing_date = "2017-08-05"
//! base_currency = "USD"
//! ir_bump_size = 0.0001
//! fx_relative_bump = 0.001
//! output_format = "table"
//! ```

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use pricer_core::types::{Currency, Date};
use pricer_risk::sensitivities::{
    SensitivityConfig, DEFAULT_FX_RELATIVE_BUMP, DEFAULT_IR_BUMP_SIZE,
};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// File read when `--config` is not given. A missing default file is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "sensi.toml";

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable blocks
    #[default]
    Table,
    /// One JSON document
    Json,
    /// One row per trade and calculation
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Settings for a risk run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// Valuation date
    pub pricing_date: Date,
    /// Reporting currency
    pub base_currency: Currency,
    /// Absolute zero-rate bump
    pub ir_bump_size: f64,
    /// Relative FX spot bump
    pub fx_relative_bump: f64,
    /// Report format
    pub output_format: OutputFormat,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            pricing_date: DEFAULT_PRICING_DATE,
            base_currency: Currency::USD,
            ir_bump_size: DEFAULT_IR_BUMP_SIZE,
            fx_relative_bump: DEFAULT_FX_RELATIVE_BUMP,
            output_format: OutputFormat::Table,
        }
    }
}

/// Pricing date when neither the config file nor the command line sets one.
///
/// Evaluated at compile time, so an invalid date fails the build.
pub const DEFAULT_PRICING_DATE: Date = match NaiveDate::from_ymd_opt(2017, 8, 5) {
    Some(date) => Date::from_naive(date),
    None => panic!("invalid default pricing date"),
};

impl RiskConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_PATH`] if it exists when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };
        let config_error = |message: String| CliError::Config {
            path: path.display().to_string(),
            message,
        };

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml_str(&text).map_err(|e| config_error(e.to_string()))?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(config_error(e.to_string())),
        }
    }

    /// Parses a TOML document; absent fields take their defaults.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Rejects bumps that are not positive and finite.
    pub fn validate(&self) -> Result<()> {
        self.sensitivity_config().validate()?;
        Ok(())
    }

    /// Bump sizes for the sensitivity engine.
    pub fn sensitivity_config(&self) -> SensitivityConfig {
        SensitivityConfig::new()
            .with_ir_bump_size(self.ir_bump_size)
            .with_fx_relative_bump(self.fx_relative_bump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.pricing_date.to_string(), "2017-08-05");
        assert_eq!(config.base_currency, Currency::USD);
        assert_eq!(config.ir_bump_size, 0.0001);
        assert_eq!(config.fx_relative_bump, 0.001);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_pricing_date() {
        assert_eq!(DEFAULT_PRICING_DATE, Date::from_ymd(2017, 8, 5).unwrap());
    }

    #[test]
    fn test_partial_file() {
        let config = RiskConfig::from_toml_str(
            r#"
            base_currency = "EUR"
            output_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_currency, Currency::EUR);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.pricing_date, RiskConfig::default().pricing_date);
    }

    #[test]
    fn test_full_file() {
        let config = RiskConfig::from_toml_str(
            r#"
            pricing_date = "2018-01-02"
            base_currency = "GBP"
            ir_bump_size = 0.0005
            fx_relative_bump = 0.01
            output_format = "csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing_date, Date::from_ymd(2018, 1, 2).unwrap());
        assert_eq!(config.sensitivity_config().ir_bump_size, 0.0005);
        assert_eq!(config.sensitivity_config().fx_relative_bump, 0.01);
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RiskConfig::from_toml_str(r#"base_currency = "usd""#).is_err());
        assert!(RiskConfig::from_toml_str(r#"output_format = "xml""#).is_err());
        assert!(RiskConfig::from_toml_str("unknown_key = 1").is_err());

        let config = RiskConfig::from_toml_str("ir_bump_size = -0.0001").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fx_relative_bump = 0.002").unwrap();
        let config = RiskConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.fx_relative_bump, 0.002);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            RiskConfig::load(Some(&missing)),
            Err(CliError::Config { .. })
        ));
    }
}
