//! FX spot rates for arbitrary currency pairs.

use std::collections::BTreeSet;

use super::Curve;
use crate::market_data::error::MarketDataError;
use crate::market_data::names::{fx_spot_name, fx_spot_risk_factor_name, FX_BASE_CURRENCY};
use crate::types::{Currency, Date};

/// Spot rate of `ccy1` expressed in `ccy2`, resolved from USD-quoted
/// `FX.SPOT.<CCY>` risk factors.
///
/// Resolution, in priority order:
/// 1. identity: both sides USD, rate 1
/// 2. direct: `ccy2` is USD, rate `FX.SPOT.<ccy1>`
/// 3. inverse: `ccy1` is USD, rate `1 / FX.SPOT.<ccy2>`
/// 4. cross: `FX.SPOT.<ccy1> / FX.SPOT.<ccy2>`
///
/// Inverse and cross rates require positive quotes (`InvalidRate`).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::FxSpotCurve;
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::{Currency, Date};
///
/// let today = Date::from_ymd(2017, 8, 5).unwrap();
/// let quotes = |name: &str| -> Result<f64, MarketDataError> {
///     match name {
///         "FX.SPOT.EUR" => Ok(1.10),
///         "FX.SPOT.GBP" => Ok(1.30),
///         _ => Err(MarketDataError::UnknownRiskFactor { name: name.to_string() }),
///     }
/// };
///
/// let curve = FxSpotCurve::new(Currency::EUR, Currency::GBP, today, quotes).unwrap();
/// assert!((curve.spot() - 0.84615).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct FxSpotCurve {
    name: String,
    ccy1: Currency,
    ccy2: Currency,
    today: Date,
    spot: f64,
    deps: BTreeSet<String>,
}

impl FxSpotCurve {
    /// Resolves the spot rate, reading USD-quoted spots through `quote`.
    ///
    /// `quote` receives risk-factor names of the form `FX.SPOT.<CCY>`.
    pub fn new(
        ccy1: Currency,
        ccy2: Currency,
        today: Date,
        mut quote: impl FnMut(&str) -> Result<f64, MarketDataError>,
    ) -> Result<Self, MarketDataError> {
        let mut deps = BTreeSet::new();
        let mut fetch = |ccy: Currency| -> Result<(String, f64), MarketDataError> {
            let rf = fx_spot_risk_factor_name(ccy);
            let value = quote(&rf)?;
            deps.insert(rf.clone());
            Ok((rf, value))
        };

        let spot = if ccy1 == FX_BASE_CURRENCY && ccy2 == FX_BASE_CURRENCY {
            1.0
        } else if ccy2 == FX_BASE_CURRENCY {
            fetch(ccy1)?.1
        } else if ccy1 == FX_BASE_CURRENCY {
            let (rf, s2) = fetch(ccy2)?;
            ensure_positive(&rf, s2)?;
            1.0 / s2
        } else {
            let (rf1, s1) = fetch(ccy1)?;
            let (rf2, s2) = fetch(ccy2)?;
            ensure_positive(&rf1, s1)?;
            ensure_positive(&rf2, s2)?;
            s1 / s2
        };

        let name = fx_spot_name(ccy1, ccy2);
        tracing::debug!(curve = %name, spot, "Built FX spot curve");

        Ok(Self {
            name,
            ccy1,
            ccy2,
            today,
            spot,
            deps,
        })
    }

    /// Spot rate: units of `ccy2` per unit of `ccy1`.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Currency pair `(ccy1, ccy2)`.
    pub fn pair(&self) -> (Currency, Currency) {
        (self.ccy1, self.ccy2)
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<(), MarketDataError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(MarketDataError::InvalidRate {
            name: name.to_string(),
            value,
        })
    }
}

impl Curve for FxSpotCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn today(&self) -> Date {
        self.today
    }

    fn dependencies(&self) -> &BTreeSet<String> {
        &self.deps
    }
}
