//! Sensitivity engine.

use std::collections::BTreeSet;

use pricer_core::market_data::names::{fx_spot_pattern, ir_tenor_pattern};
use pricer_core::market_data::{FixingDataServer, Market};
use pricer_core::types::Currency;
use pricer_models::pricers::Pricer;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::SensitivityConfig;
use crate::error::RiskError;
use crate::portfolio::{compute_prices, PortfolioValue};

/// Per-trade sensitivities to one bump group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sensitivity {
    /// Bump group key: a currency code or a risk-factor name
    pub key: String,
    /// One value per pricer, in portfolio order
    pub values: Vec<PortfolioValue>,
}

/// Computes PV01 and FX delta for a list of pricers.
///
/// The base market passed to each calculation is never modified. The
/// engine works on a clone, which shares the already built curves, and
/// prices the portfolio once on it so that every risk factor the trades
/// need is cached before bump sets are enumerated.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{Market, RiskFactorStore};
/// use pricer_core::types::{Currency, Date};
/// use pricer_models::trades::TradePayment;
/// use pricer_risk::sensitivities::{SensitivityConfig, SensitivityEngine};
///
/// let store: RiskFactorStore = vec![("IR.1Y.USD", 0.01)].into_iter().collect();
/// let today = Date::from_ymd(2017, 8, 5).unwrap();
/// let market = Market::new(Arc::new(store), today);
///
/// let pricers = vec![
///     TradePayment::new(Currency::USD, 100.0, today.add_days(365)).unwrap().pricer(Currency::USD),
/// ];
/// let engine = SensitivityEngine::new(&pricers, None, SensitivityConfig::default()).unwrap();
///
/// let pv01 = engine.pv01_parallel(&market).unwrap();
/// assert_eq!(pv01[0].key, "USD");
/// // d/dr of 100 * exp(-r) at r = 1%
/// assert!((pv01[0].values[0].value + 100.0 * (-0.01_f64).exp()).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct SensitivityEngine<'a> {
    pricers: &'a [Pricer],
    fixings: Option<&'a FixingDataServer>,
    config: SensitivityConfig,
}

impl<'a> SensitivityEngine<'a> {
    /// Creates an engine after validating `config`.
    pub fn new(
        pricers: &'a [Pricer],
        fixings: Option<&'a FixingDataServer>,
        config: SensitivityConfig,
    ) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self {
            pricers,
            fixings,
            config,
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// Sensitivity to a parallel shift of each currency's zero curve.
    ///
    /// One group per currency referenced by the pricers, in currency order.
    /// Every tenor of that currency is bumped by the same absolute amount.
    /// Currencies with no tenor quotes in the market are skipped.
    pub fn pv01_parallel(&self, market: &Market) -> Result<Vec<Sensitivity>, RiskError> {
        let mut market = self.prepare(market);
        let bump = self.config.ir_bump_size;

        let currencies: BTreeSet<Currency> =
            self.pricers.iter().flat_map(|p| p.currencies()).collect();

        let mut result = Vec::with_capacity(currencies.len());
        for ccy in currencies {
            let base = market.match_risk_factors(&ir_tenor_pattern(Some(ccy)))?;
            if base.is_empty() {
                tracing::debug!(%ccy, "No tenor quotes cached, skipping parallel PV01");
                continue;
            }
            let down = shifted(&base, |v| v - bump);
            let up = shifted(&base, |v| v + bump);
            let values = self.scenario(&mut market, ccy.code(), &base, &down, &up, 2.0 * bump)?;
            result.push(Sensitivity {
                key: ccy.code().to_string(),
                values,
            });
        }
        Ok(result)
    }

    /// Sensitivity to each tenor quote individually, in name order.
    pub fn pv01_bucketed(&self, market: &Market) -> Result<Vec<Sensitivity>, RiskError> {
        let mut market = self.prepare(market);
        let bump = self.config.ir_bump_size;

        let factors = market.match_risk_factors(&ir_tenor_pattern(None))?;
        let mut result = Vec::with_capacity(factors.len());
        for (name, value) in factors {
            let base = [(name.clone(), value)];
            let down = shifted(&base, |v| v - bump);
            let up = shifted(&base, |v| v + bump);
            let values = self.scenario(&mut market, &name, &base, &down, &up, 2.0 * bump)?;
            result.push(Sensitivity { key: name, values });
        }
        Ok(result)
    }

    /// Sensitivity to each USD-quoted FX spot, bumped relatively.
    ///
    /// The central difference is divided by the absolute spot move
    /// `2 * spot * fx_relative_bump`. A zero or non-finite spot cannot be
    /// bumped relatively and yields a failed value for every trade.
    pub fn fx_delta(&self, market: &Market) -> Result<Vec<Sensitivity>, RiskError> {
        let mut market = self.prepare(market);
        let rel = self.config.fx_relative_bump;

        let factors = market.match_risk_factors(&fx_spot_pattern())?;
        let mut result = Vec::with_capacity(factors.len());
        for (name, spot) in factors {
            let width = 2.0 * spot * rel;
            let values = if width.is_finite() && width != 0.0 {
                let base = [(name.clone(), spot)];
                let down = shifted(&base, |v| v * (1.0 - rel));
                let up = shifted(&base, |v| v * (1.0 + rel));
                self.scenario(&mut market, &name, &base, &down, &up, width)?
            } else {
                let message = format!("Cannot bump {} relatively from spot {}", name, spot);
                tracing::warn!(scenario = %name, %spot, "FX delta unavailable");
                vec![PortfolioValue::failed(message); self.pricers.len()]
            };
            result.push(Sensitivity { key: name, values });
        }
        Ok(result)
    }

    /// Clone of `market` with every risk factor of the portfolio cached.
    fn prepare(&self, market: &Market) -> Market {
        let mut market = market.clone();
        compute_prices(self.pricers, &mut market, self.fixings);
        market
    }

    /// Down, up, restore; then the central difference per trade.
    fn scenario(
        &self,
        market: &mut Market,
        name: &str,
        base: &[(String, f64)],
        down: &[(String, f64)],
        up: &[(String, f64)],
        width: f64,
    ) -> Result<Vec<PortfolioValue>, RiskError> {
        tracing::debug!(scenario = name, factors = base.len(), "Bumping risk factors");

        market.set_risk_factors(down)?;
        let pv_down = compute_prices(self.pricers, market, self.fixings);
        market.set_risk_factors(up)?;
        let pv_up = compute_prices(self.pricers, market, self.fixings);
        market.set_risk_factors(base)?;

        Ok(pv_down
            .into_iter()
            .zip(pv_up)
            .enumerate()
            .map(|(i, (lo, hi))| match (lo.error, hi.error) {
                (Some(msg), _) | (None, Some(msg)) => {
                    tracing::warn!(scenario = name, trade = i, error = %msg, "Sensitivity unavailable");
                    PortfolioValue::failed(msg)
                }
                (None, None) => PortfolioValue::ok((hi.value - lo.value) / width),
            })
            .collect())
    }
}

fn shifted(base: &[(String, f64)], f: impl Fn(f64) -> f64) -> Vec<(String, f64)> {
    base.iter().map(|(name, v)| (name.clone(), f(*v))).collect()
}
