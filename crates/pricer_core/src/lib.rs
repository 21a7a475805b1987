//! # pricer_core: Market Foundation for Sensitivity Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Time types: `Date` (`types::time`)
//! - Currency types: `Currency` (`types::currency`)
//! - Error types: `PricingError`, `DateError`, `CurrencyError` (`types::error`)
//! - Risk-factor naming, store and fixings (`market_data`)
//! - Discount, FX spot and FX forward curves (`market_data::curves`)
//! - The `Market` cache that builds curves lazily and supports bumps
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - regex: Risk-factor name matching at the store boundary
//! - thiserror: Error derivation
//! - tracing: Structured logging of curve construction and cache activity
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::{Market, RiskFactorStore};
//! use pricer_core::types::{Currency, Date};
//!
//! let store: RiskFactorStore = vec![("IR.1Y.USD", 0.02), ("FX.SPOT.EUR", 1.18)]
//!     .into_iter()
//!     .collect();
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let mut market = Market::new(Arc::new(store), today);
//!
//! let df = market.discount_curve(Currency::USD).unwrap().df(today.add_days(365)).unwrap();
//! assert!((df - (-0.02_f64).exp()).abs() < 1e-15);
//!
//! let spot = market.fx_spot(Currency::USD, Currency::EUR).unwrap();
//! assert!((spot - 1.0 / 1.18).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date and Currency

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
