//! FX forward pricer.

use pricer_core::market_data::names::fx_spot_name;
use pricer_core::market_data::{FixingDataServer, Market};
use pricer_core::types::{Currency, Date, PricingError};

use crate::trades::TradeFxForward;

/// Values a deliverable FX forward in the base currency.
///
/// With valuation date `T0`, fixing `T1` and settlement `T2`, the rate `S`
/// used in the payoff `quantity * df2(T2) * (S - strike)` is:
///
/// | Case             | `S`                                                  |
/// |------------------|------------------------------------------------------|
/// | `T0 < T1`        | forward `ccy1/ccy2` at `T1`                          |
/// | `T0 == T1`       | fixing if available, otherwise the forward at `T1`   |
/// | `T1 < T0 <= T2`  | fixing, which must exist                             |
/// | `T0 > T2`        | error: the trade has expired                         |
#[derive(Debug, Clone, PartialEq)]
pub struct FxForwardPricer {
    ccy1: Currency,
    ccy2: Currency,
    quantity: f64,
    strike: f64,
    fixing_date: Date,
    settle_date: Date,
    fixing_name: String,
    base_ccy: Currency,
}

impl FxForwardPricer {
    /// Pricer for `trade` reporting in `base_ccy`.
    pub fn new(trade: &TradeFxForward, base_ccy: Currency) -> Self {
        Self {
            ccy1: trade.ccy1(),
            ccy2: trade.ccy2(),
            quantity: trade.quantity(),
            strike: trade.strike(),
            fixing_date: trade.fixing_date(),
            settle_date: trade.settle_date(),
            fixing_name: fx_spot_name(trade.ccy1(), trade.ccy2()),
            base_ccy,
        }
    }

    /// Present value in the base currency.
    ///
    /// # Errors
    ///
    /// - `ExpiredTrade` when settlement is before the valuation date
    /// - `FixingRequired` when the rate has fixed and `fixings` is `None`
    /// - `Market(MissingFixing)` when the required fixing is absent
    /// - any curve failure from the market
    pub fn price(
        &self,
        market: &mut Market,
        fixings: Option<&FixingDataServer>,
    ) -> Result<f64, PricingError> {
        let today = market.today();
        if today > self.settle_date {
            return Err(PricingError::ExpiredTrade {
                today,
                settle: self.settle_date,
            });
        }

        let b2 = market.discount_curve(self.ccy2)?.df(self.settle_date)?;
        let rate = self.settlement_rate(market, fixings, today)?;

        let mut pv = self.quantity * b2 * (rate - self.strike);
        if self.ccy2 != self.base_ccy {
            pv *= market.fx_spot(self.ccy2, self.base_ccy)?;
        }
        Ok(pv)
    }

    fn settlement_rate(
        &self,
        market: &mut Market,
        fixings: Option<&FixingDataServer>,
        today: Date,
    ) -> Result<f64, PricingError> {
        if today < self.fixing_date {
            return self.forward(market);
        }
        if today == self.fixing_date {
            if let Some(fixed) = fixings.and_then(|fds| fds.lookup(&self.fixing_name, today)) {
                return Ok(fixed);
            }
            tracing::debug!(
                fixing = %self.fixing_name,
                date = %today,
                "No fixing on fixing date, using forward"
            );
            return self.forward(market);
        }
        let fds = fixings.ok_or_else(|| PricingError::FixingRequired {
            name: self.fixing_name.clone(),
            date: self.fixing_date,
        })?;
        Ok(fds.get(&self.fixing_name, self.fixing_date)?)
    }

    fn forward(&self, market: &mut Market) -> Result<f64, PricingError> {
        Ok(market
            .fx_forward_curve(self.ccy1, self.ccy2)?
            .fwd(self.fixing_date)?)
    }

    /// Both currencies of the pair, sorted.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut ccys = vec![self.ccy1, self.ccy2];
        ccys.sort();
        ccys
    }
}
