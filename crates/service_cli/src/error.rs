//! CLI error types.

use pricer_core::market_data::{LoadError, MarketDataError};
use pricer_core::types::DateError;
use pricer_models::{InstrumentError, PortfolioError};
use pricer_risk::RiskError;
use thiserror::Error;

/// Any failure that aborts a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error in {path}: {message}")]
    Config {
        /// Configuration file
        path: String,
        /// Description of the problem
        message: String,
    },

    /// Invalid bump configuration or a failed sensitivity run.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Risk-factor or fixing file failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Portfolio file failed to load or save.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Trade failed validation.
    #[error(transparent)]
    Trade(#[from] InstrumentError),

    /// Invalid date.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Market access failed outside a per-trade calculation.
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;
