//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing a single trade against a market
//! - `DateError`: Errors from date construction and parsing
//! - `CurrencyError`: Errors from currency parsing

use std::fmt;
use thiserror::Error;

use super::time::Date;
use crate::market_data::MarketDataError;

/// Categorised pricing errors.
///
/// Raised by a pricer for one trade. Market lookups propagate unchanged
/// through the `Market` variant so callers can still inspect the
/// underlying [`ErrorKind`](crate::market_data::ErrorKind).
///
/// # Variants
/// - `Market`: Curve construction or market lookup failed
/// - `ExpiredTrade`: Settlement date is before the valuation date
/// - `FixingRequired`: A historical fixing is needed but no fixing source was supplied
/// - `InvalidInput`: Invalid trade data or parameters
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative notional".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative notional");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Curve construction or market lookup failed.
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// The trade settled before the valuation date.
    #[error("Trade expired: settlement {settle} is before valuation date {today}")]
    ExpiredTrade {
        /// Valuation date
        today: Date,
        /// Settlement date of the trade
        settle: Date,
    },

    /// A historical fixing is required but no fixing source was supplied.
    #[error("Fixing required for {name} on {date} but no fixing data was provided")]
    FixingRequired {
        /// Fixing name
        name: String,
        /// Fixing date
        date: Date,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::InvalidCode("usd".to_string());
/// assert_eq!(format!("{}", err), "Invalid currency code: 'usd'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Code is not three upper-case ASCII letters.
    InvalidCode(String),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::InvalidCode(code) => write!(f, "Invalid currency code: '{}'", code),
        }
    }
}

impl std::error::Error for CurrencyError {}
