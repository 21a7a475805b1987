//! # Pricer Risk (L4: Application)
//!
//! Portfolio valuation and bump-and-revalue sensitivities.
//!
//! This crate provides:
//! - Portfolio valuation with per-trade failure isolation
//!   ([`compute_prices`], [`portfolio_total`])
//! - Parallel and bucketed PV01 and FX delta by central differences
//!   ([`SensitivityEngine`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/     - values and totals     │
//! │  sensitivities/ - PV01, FX delta        │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Trades and pricers                     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)             │
//! │  Market cache, curves, risk factors     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{Market, RiskFactorStore};
//! use pricer_core::types::{Currency, Date};
//! use pricer_models::trades::{get_pricers, Portfolio, TradePayment};
//! use pricer_risk::{compute_prices, portfolio_total};
//!
//! let store: RiskFactorStore = vec![("IR.1Y.USD", 0.02)].into_iter().collect();
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let mut market = Market::new(Arc::new(store), today);
//!
//! let portfolio: Portfolio = vec![
//!     TradePayment::new(Currency::USD, 10.0, today).unwrap().into(),
//!     TradePayment::new(Currency::GBP, 10.0, today).unwrap().into(),
//! ];
//! let pricers = get_pricers(&portfolio, Currency::USD);
//! let total = portfolio_total(&compute_prices(&pricers, &mut market, None));
//!
//! assert_eq!(total.total, 10.0);
//! assert_eq!(total.failures.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod portfolio;
pub mod sensitivities;

// Re-export commonly used types
pub use error::RiskError;
pub use portfolio::{compute_prices, portfolio_total, PortfolioTotal, PortfolioValue};
pub use sensitivities::{Sensitivity, SensitivityConfig, SensitivityEngine};
