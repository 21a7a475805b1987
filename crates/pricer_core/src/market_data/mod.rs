//! Market data: risk factors, fixings, curves and the market cache.
//!
//! # Components
//!
//! - [`names`]: Dotted naming convention for risk factors and curves
//! - [`store`]: Flat `name -> value` risk-factor store ([`RiskFactorStore`])
//! - [`fixings`]: Historical fixings keyed by name and date ([`FixingDataServer`])
//! - [`curves`]: Discount, FX spot and FX forward curves
//! - [`market`]: Lazy curve cache with bump and disconnect support ([`Market`])
//! - [`error`]: Market data error types ([`MarketDataError`], [`LoadError`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{Market, RiskFactorStore};
//! use pricer_core::types::{Currency, Date};
//!
//! let store = RiskFactorStore::from_reader(
//!     "IR.1Y.EUR 0.01\nIR.1Y.USD 0.02\nFX.SPOT.EUR 1.18\n".as_bytes(),
//! ).unwrap();
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let mut market = Market::new(Arc::new(store), today);
//!
//! let fwd = market.get_fx_forward_curve("FX.FWD.EUR.USD").unwrap();
//! let f = fwd.fwd(today.add_days(365)).unwrap();
//! assert!((f - 1.18 * (0.01_f64).exp()).abs() < 1e-12);
//! ```

pub mod curves;
pub mod error;
pub mod fixings;
pub mod market;
pub mod names;
pub mod store;

// Re-export commonly used types
pub use curves::{Curve, CurveHandle, DiscountCurve, FxForwardCurve, FxSpotCurve};
pub use error::{ErrorKind, LoadError, MarketDataError};
pub use fixings::FixingDataServer;
pub use market::Market;
pub use store::RiskFactorStore;
