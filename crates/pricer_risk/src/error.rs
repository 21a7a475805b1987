//! Risk calculation errors.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors that abort a whole risk calculation.
///
/// Per-trade pricing failures never surface here; they are recorded as
/// not-a-number values alongside their message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// Market access failed while enumerating or applying bumps.
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// A bump size is zero, negative or not finite.
    #[error("Invalid {name}: {value} (must be positive and finite)")]
    InvalidBumpSize {
        /// Configuration field
        name: &'static str,
        /// Rejected value
        value: f64,
    },
}
