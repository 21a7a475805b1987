//! Payment pricer.

use pricer_core::market_data::{FixingDataServer, Market};
use pricer_core::types::{Currency, Date, PricingError};

use crate::trades::TradePayment;

/// Discounts a single payment and converts it into the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPricer {
    ccy: Currency,
    quantity: f64,
    delivery_date: Date,
    base_ccy: Currency,
}

impl PaymentPricer {
    /// Pricer for `trade` reporting in `base_ccy`.
    pub fn new(trade: &TradePayment, base_ccy: Currency) -> Self {
        Self {
            ccy: trade.ccy(),
            quantity: trade.quantity(),
            delivery_date: trade.delivery_date(),
            base_ccy,
        }
    }

    /// `quantity * df(delivery)`, times the spot rate into the base currency.
    pub fn price(
        &self,
        market: &mut Market,
        _fixings: Option<&FixingDataServer>,
    ) -> Result<f64, PricingError> {
        let df = market.discount_curve(self.ccy)?.df(self.delivery_date)?;
        let mut pv = self.quantity * df;
        if self.ccy != self.base_ccy {
            pv *= market.fx_spot(self.ccy, self.base_ccy)?;
        }
        Ok(pv)
    }

    /// Currency whose rate curve drives this price.
    pub fn currencies(&self) -> Vec<Currency> {
        vec![self.ccy]
    }
}
