//! # Pricer Models (L2: Business Logic)
//!
//! Trades, portfolio files and the pricers that value them.
//!
//! This crate provides:
//! - Validated trade definitions ([`trades::TradePayment`], [`trades::TradeFxForward`])
//! - The [`trades::Trade`] enum tagged by a stable type id, with JSON
//!   portfolio load/save (feature `serde`)
//! - Pricers ([`pricers::Pricer`]) valuing trades against a
//!   [`pricer_core::market_data::Market`] in a chosen base currency
//!
//! ## Design Principles
//!
//! - **Enum-based trades and pricers** for static dispatch
//! - **Validated constructors**: invalid trades cannot be built or loaded
//! - **Pricers own their inputs**, so a portfolio's pricers outlive the trades
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{Market, RiskFactorStore};
//! use pricer_core::types::{Currency, Date};
//! use pricer_models::trades::TradePayment;
//!
//! let store: RiskFactorStore = vec![("IR.1Y.USD", 0.02)].into_iter().collect();
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let mut market = Market::new(Arc::new(store), today);
//!
//! let pricer = TradePayment::new(Currency::USD, 100.0, today).unwrap().pricer(Currency::USD);
//! assert_eq!(pricer.price(&mut market, None).unwrap(), 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod pricers;
pub mod trades;

pub use error::{InstrumentError, PortfolioError};
