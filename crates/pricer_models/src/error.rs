//! Trade and portfolio error types.
//!
//! This module provides structured error handling for trade construction
//! and portfolio file I/O.

use pricer_core::types::{CurrencyError, PricingError};
use thiserror::Error;

/// Trade-related errors.
///
/// Raised by validated trade constructors, including when trades are
/// deserialised from a portfolio file.
///
/// # Examples
/// ```
/// use pricer_models::InstrumentError;
///
/// let err = InstrumentError::InvalidInstrumentField {
///     field: "strike",
///     message: "must be positive, got -1".to_string(),
/// };
/// assert_eq!(format!("{}", err), "Invalid strike: must be positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// A trade field failed validation.
    #[error("Invalid {field}: {message}")]
    InvalidInstrumentField {
        /// Name of the offending field
        field: &'static str,
        /// Description of the problem
        message: String,
    },

    /// Currency code failed to parse.
    #[error("Currency error: {0}")]
    Currency(#[from] CurrencyError),
}

impl InstrumentError {
    pub(crate) fn field(field: &'static str, message: impl Into<String>) -> Self {
        InstrumentError::InvalidInstrumentField {
            field,
            message: message.into(),
        }
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Portfolio file errors.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Underlying I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Portfolio file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a trade that failed validation.
    #[cfg(feature = "serde")]
    #[error("Invalid portfolio {path}: {source}")]
    Format {
        /// Portfolio file
        path: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display() {
        let err = InstrumentError::field("quantity", "must be finite, got NaN");
        assert_eq!(format!("{}", err), "Invalid quantity: must be finite, got NaN");
    }

    #[test]
    fn test_currency_error_wrapped() {
        let err: InstrumentError = CurrencyError::InvalidCode("eu".to_string()).into();
        assert!(matches!(err, InstrumentError::Currency(_)));
        assert!(err.to_string().contains("'eu'"));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = InstrumentError::field("strike", "must be positive").into();
        assert_eq!(
            err,
            PricingError::InvalidInput("Invalid strike: must be positive".to_string())
        );
    }
}
