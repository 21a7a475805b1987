//! Portfolio valuation with per-trade failure isolation.
//!
//! A failing pricer does not abort the batch: its slot holds `NaN` and the
//! failure message, and [`portfolio_total`] reports it separately instead of
//! folding it into the sum.

use pricer_core::market_data::{FixingDataServer, Market};
use pricer_models::pricers::Pricer;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Value of one trade, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PortfolioValue {
    /// Value in the base currency; `NaN` when `error` is set
    pub value: f64,
    /// Failure message
    pub error: Option<String>,
}

impl PortfolioValue {
    /// Successful value.
    pub fn ok(value: f64) -> Self {
        Self { value, error: None }
    }

    /// Failed value carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            value: f64::NAN,
            error: Some(message.into()),
        }
    }

    /// Returns `true` when no failure was recorded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Sum of the successful values plus the failures, by trade index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PortfolioTotal {
    /// Sum over trades without a failure
    pub total: f64,
    /// `(trade index, message)` for every failed trade
    pub failures: Vec<(usize, String)>,
}

/// Prices every pricer against `market`, in order.
pub fn compute_prices(
    pricers: &[Pricer],
    market: &mut Market,
    fixings: Option<&FixingDataServer>,
) -> Vec<PortfolioValue> {
    pricers
        .iter()
        .enumerate()
        .map(|(i, pricer)| match pricer.price(market, fixings) {
            Ok(value) => PortfolioValue::ok(value),
            Err(err) => {
                tracing::debug!(trade = i, error = %err, "Pricing failed");
                PortfolioValue::failed(err.to_string())
            }
        })
        .collect()
}

/// Totals `values`, never dropping a failure silently.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::{portfolio_total, PortfolioValue};
///
/// let values = vec![PortfolioValue::ok(1.5), PortfolioValue::failed("boom"), PortfolioValue::ok(2.0)];
/// let total = portfolio_total(&values);
/// assert_eq!(total.total, 3.5);
/// assert_eq!(total.failures, vec![(1, "boom".to_string())]);
/// ```
pub fn portfolio_total(values: &[PortfolioValue]) -> PortfolioTotal {
    let mut total = 0.0;
    let mut failures = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match &v.error {
            None => total += v.value,
            Some(msg) => failures.push((i, msg.clone())),
        }
    }
    PortfolioTotal { total, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::RiskFactorStore;
    use pricer_core::types::{Currency, Date};
    use pricer_models::trades::{get_pricers, Portfolio, TradeFxForward, TradePayment};
    use std::sync::Arc;

    fn today() -> Date {
        Date::from_ymd(2017, 8, 5).unwrap()
    }

    #[test]
    fn test_one_failure_excluded_from_total() {
        let store: RiskFactorStore = vec![("IR.1Y.USD", 0.02), ("IR.1Y.EUR", 0.01), ("FX.SPOT.EUR", 1.2)]
            .into_iter()
            .collect();
        let mut market = Market::new(Arc::new(store), today());

        let portfolio: Portfolio = vec![
            TradePayment::new(Currency::USD, 10.0, today().add_days(100))
                .unwrap()
                .into(),
            TradeFxForward::new(
                Currency::EUR,
                Currency::USD,
                1.0,
                1.2,
                today().add_days(-1),
                today().add_days(1),
            )
            .unwrap()
            .into(),
        ];
        let pricers = get_pricers(&portfolio, Currency::USD);
        let values = compute_prices(&pricers, &mut market, None);

        assert!(values[0].is_ok());
        assert!(values[1].value.is_nan());

        let total = portfolio_total(&values);
        assert_relative_eq!(total.total, values[0].value);
        assert_eq!(total.failures.len(), 1);
        assert_eq!(total.failures[0].0, 1);
        assert!(total.failures[0].1.contains("FX.SPOT.EUR.USD"));
    }

    #[test]
    fn test_empty_portfolio() {
        let total = portfolio_total(&[]);
        assert_eq!(total.total, 0.0);
        assert!(total.failures.is_empty());
    }
}
