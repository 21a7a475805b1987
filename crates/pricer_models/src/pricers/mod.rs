//! Pricers bound to a reporting currency.
//!
//! A [`Pricer`] is produced from a trade and values it against a
//! [`Market`], converting the result into its base currency. Pricers read
//! the market through its lazy curve cache, so the first valuation pulls
//! every risk factor the trade depends on.

mod fx_forward;
mod payment;

use pricer_core::market_data::{FixingDataServer, Market};
use pricer_core::types::{Currency, PricingError};

pub use fx_forward::FxForwardPricer;
pub use payment::PaymentPricer;

/// Pricer for any supported trade.
#[derive(Debug, Clone, PartialEq)]
pub enum Pricer {
    /// Single cash payment
    Payment(PaymentPricer),
    /// Deliverable FX forward
    FxForward(FxForwardPricer),
}

impl Pricer {
    /// Present value in the base currency.
    ///
    /// `fixings` is only consulted by trades whose rate has already fixed.
    pub fn price(
        &self,
        market: &mut Market,
        fixings: Option<&FixingDataServer>,
    ) -> Result<f64, PricingError> {
        match self {
            Pricer::Payment(p) => p.price(market, fixings),
            Pricer::FxForward(p) => p.price(market, fixings),
        }
    }

    /// Currencies whose interest-rate curves affect the price, sorted.
    pub fn currencies(&self) -> Vec<Currency> {
        match self {
            Pricer::Payment(p) => p.currencies(),
            Pricer::FxForward(p) => p.currencies(),
        }
    }
}
