//! Trade definitions.
//!
//! Trades are a closed set of variants dispatched statically through the
//! [`Trade`] enum. Each variant is built through a validated constructor and
//! yields a [`Pricer`] for a chosen reporting currency.
//!
//! # Trade Types
//!
//! | Type id      | Variant                          |
//! |--------------|----------------------------------|
//! | `payment`    | [`TradePayment`]                 |
//! | `fx_forward` | [`TradeFxForward`]               |
//!
//! # Examples
//!
//! ```
//! use pricer_models::trades::{Trade, TradePayment};
//! use pricer_core::types::{Currency, Date};
//!
//! let trade = Trade::Payment(
//!     TradePayment::new(Currency::EUR, 20.0, Date::from_ymd(2020, 2, 2).unwrap()).unwrap(),
//! );
//! assert_eq!(trade.type_id(), "payment");
//!
//! let pricer = trade.pricer(Currency::USD);
//! assert_eq!(pricer.currencies(), vec![Currency::EUR]);
//! ```

mod fx_forward;
mod payment;
#[cfg(feature = "serde")]
mod portfolio;

use std::fmt;

use pricer_core::types::Currency;

use crate::pricers::Pricer;

pub use fx_forward::TradeFxForward;
pub use payment::TradePayment;
#[cfg(feature = "serde")]
pub use portfolio::{load_portfolio, portfolio_from_reader, portfolio_to_writer, save_portfolio};

/// A portfolio is an ordered list of trades.
pub type Portfolio = Vec<Trade>;

/// Any supported trade.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Trade {
    /// Single cash payment
    Payment(TradePayment),
    /// Deliverable FX forward
    FxForward(TradeFxForward),
}

impl Trade {
    /// Stable type identifier used in portfolio files.
    pub fn type_id(&self) -> &'static str {
        match self {
            Trade::Payment(_) => "payment",
            Trade::FxForward(_) => "fx_forward",
        }
    }

    /// Human-readable trade name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Trade::Payment(_) => "Payment",
            Trade::FxForward(_) => "FX Forward",
        }
    }

    /// Pricer reporting in `base_ccy`.
    pub fn pricer(&self, base_ccy: Currency) -> Pricer {
        match self {
            Trade::Payment(t) => t.pricer(base_ccy),
            Trade::FxForward(t) => t.pricer(base_ccy),
        }
    }
}

impl From<TradePayment> for Trade {
    fn from(t: TradePayment) -> Self {
        Trade::Payment(t)
    }
}

impl From<TradeFxForward> for Trade {
    fn from(t: TradeFxForward) -> Self {
        Trade::FxForward(t)
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", format_label("Trade type"), self.type_name())?;
        match self {
            Trade::Payment(t) => write!(f, "{}", t),
            Trade::FxForward(t) => write!(f, "{}", t),
        }
    }
}

/// Pricers for every trade in `portfolio`, in order.
pub fn get_pricers(portfolio: &[Trade], base_ccy: Currency) -> Vec<Pricer> {
    portfolio.iter().map(|t| t.pricer(base_ccy)).collect()
}

/// Left-aligned label column used by trade printouts.
pub(crate) fn format_label(label: &str) -> String {
    format!("{:<20}", format!("{}:", label))
}
