//! Market data error types.
//!
//! This module provides structured error handling for curve construction,
//! market lookups and flat-file loading of risk factors and fixings.

use crate::types::{Date, DateError};
use thiserror::Error;

/// Field-less classification of a [`MarketDataError`].
///
/// Useful where only the failure category matters (tests, reporting).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No usable tenor quotes for the curve.
    CurveBuildFailure,
    /// Tenor grid days are not strictly increasing.
    NonIncreasingGrid,
    /// Requested date is before the curve anchor.
    BeforeAnchor,
    /// Requested date is after the last tenor.
    BeyondLastTenor,
    /// Non-positive FX spot rate.
    InvalidRate,
    /// Non-positive discount factor in a forward computation.
    InvalidDiscountFactor,
    /// Risk factor not present in the market.
    UnknownRiskFactor,
    /// On-demand construction attempted after disconnect.
    MarketDisconnected,
    /// Historical fixing not found.
    MissingFixing,
    /// Curve or risk-factor name does not follow the naming convention.
    InvalidCurveName,
    /// Regular expression failed to compile.
    InvalidPattern,
}

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{ErrorKind, MarketDataError};
///
/// let err = MarketDataError::UnknownRiskFactor { name: "IR.1Y.XXX".to_string() };
/// assert_eq!(err.kind(), ErrorKind::UnknownRiskFactor);
/// assert!(format!("{}", err).contains("IR.1Y.XXX"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// The curve's tenor quotes cannot form a grid.
    #[error("Cannot build curve {curve}: {reason}")]
    CurveBuildFailure {
        /// Curve name
        curve: String,
        /// What went wrong, e.g. no quote matched the tenor pattern
        reason: String,
    },

    /// Tenor grid is not strictly increasing in days.
    #[error("Curve {curve}: tenor grid not strictly increasing ({prev} then {next} days)")]
    NonIncreasingGrid {
        /// Curve name
        curve: String,
        /// Earlier grid day
        prev: u32,
        /// Later grid day
        next: u32,
    },

    /// Discount factor requested before the anchor date.
    #[error("Curve {curve}: date {date} is before anchor date {anchor}")]
    BeforeAnchor {
        /// Curve name
        curve: String,
        /// Requested date
        date: Date,
        /// Anchor date of the curve
        anchor: Date,
    },

    /// Discount factor requested beyond the last tenor.
    #[error("Curve {curve}: date {date} is {days} days from anchor, beyond last tenor at {last} days")]
    BeyondLastTenor {
        /// Curve name
        curve: String,
        /// Requested date
        date: Date,
        /// Days from anchor to the requested date
        days: i64,
        /// Last grid day
        last: u32,
    },

    /// FX spot rate is not positive.
    #[error("Invalid FX rate {name} = {value}: must be positive")]
    InvalidRate {
        /// Risk factor name
        name: String,
        /// Offending value
        value: f64,
    },

    /// Discount factor is not positive.
    #[error("Invalid discount factor on {curve} at {date}: {value}")]
    InvalidDiscountFactor {
        /// Discount curve name
        curve: String,
        /// Date of evaluation
        date: Date,
        /// Offending value
        value: f64,
    },

    /// Risk factor not present.
    #[error("Unknown risk factor: {name}")]
    UnknownRiskFactor {
        /// Risk factor name
        name: String,
    },

    /// Market no longer connected to its backing store.
    #[error("Market disconnected: cannot fetch or build {name}")]
    MarketDisconnected {
        /// Requested name
        name: String,
    },

    /// Historical fixing not available.
    #[error("Fixing not found: {name} on {date}")]
    MissingFixing {
        /// Fixing name
        name: String,
        /// Fixing date
        date: Date,
    },

    /// Name does not follow the naming convention.
    #[error("Invalid curve name: {name}")]
    InvalidCurveName {
        /// Offending name
        name: String,
    },

    /// Regular expression failed to compile.
    #[error("Invalid pattern {pattern}: {message}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compiler message
        message: String,
    },
}

impl MarketDataError {
    /// Returns the field-less kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketDataError::CurveBuildFailure { .. } => ErrorKind::CurveBuildFailure,
            MarketDataError::NonIncreasingGrid { .. } => ErrorKind::NonIncreasingGrid,
            MarketDataError::BeforeAnchor { .. } => ErrorKind::BeforeAnchor,
            MarketDataError::BeyondLastTenor { .. } => ErrorKind::BeyondLastTenor,
            MarketDataError::InvalidRate { .. } => ErrorKind::InvalidRate,
            MarketDataError::InvalidDiscountFactor { .. } => ErrorKind::InvalidDiscountFactor,
            MarketDataError::UnknownRiskFactor { .. } => ErrorKind::UnknownRiskFactor,
            MarketDataError::MarketDisconnected { .. } => ErrorKind::MarketDisconnected,
            MarketDataError::MissingFixing { .. } => ErrorKind::MissingFixing,
            MarketDataError::InvalidCurveName { .. } => ErrorKind::InvalidCurveName,
            MarketDataError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
        }
    }
}

/// Errors raised while loading risk-factor or fixing files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Underlying I/O failure.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File being read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Line does not have the expected fields.
    #[error("Line {line}: {message}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Same key appears twice.
    #[error("Line {line}: duplicate entry {key}")]
    Duplicate {
        /// 1-based line number of the second occurrence
        line: usize,
        /// Duplicated key
        key: String,
    },

    /// Date field could not be parsed.
    #[error("Line {line}: {source}")]
    BadDate {
        /// 1-based line number
        line: usize,
        /// Underlying date error
        #[source]
        source: DateError,
    },
}
