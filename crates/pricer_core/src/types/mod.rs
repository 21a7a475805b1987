//! Core time, currency and error types.
//!
//! This module provides:
//! - `time`: The `Date` valuation/cashflow date type
//! - `currency`: ISO 4217 currency codes
//! - `error`: Structured error types for pricing, date and currency operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`Currency`] from `currency`
//! - [`PricingError`], [`DateError`], [`CurrencyError`] from `error`

pub mod currency;
pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use error::{CurrencyError, DateError, PricingError};
pub use time::Date;
