//! FX forward rates by covered interest parity.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Curve, DiscountCurve, FxSpotCurve};
use crate::market_data::error::MarketDataError;
use crate::market_data::names::fx_forward_name;
use crate::types::{Currency, Date};

#[derive(Debug, Clone)]
struct ForwardLegs {
    spot: Arc<FxSpotCurve>,
    disc1: Arc<DiscountCurve>,
    disc2: Arc<DiscountCurve>,
}

/// Forward rate `F(T) = S0 * B1(T) / B2(T)` of `ccy1` in `ccy2`.
///
/// Holds shared handles to the spot curve and both discount curves it was
/// built from. When both currencies are equal the forward is identically 1
/// and no component curves are needed.
#[derive(Debug, Clone)]
pub struct FxForwardCurve {
    name: String,
    ccy1: Currency,
    ccy2: Currency,
    today: Date,
    legs: Option<ForwardLegs>,
    deps: BTreeSet<String>,
}

impl FxForwardCurve {
    /// Creates a forward curve from its component curves.
    pub fn new(
        today: Date,
        spot: Arc<FxSpotCurve>,
        disc1: Arc<DiscountCurve>,
        disc2: Arc<DiscountCurve>,
    ) -> Self {
        let (ccy1, ccy2) = spot.pair();
        let deps = spot
            .dependencies()
            .iter()
            .chain(disc1.dependencies())
            .chain(disc2.dependencies())
            .cloned()
            .collect();
        Self {
            name: fx_forward_name(ccy1, ccy2),
            ccy1,
            ccy2,
            today,
            legs: Some(ForwardLegs { spot, disc1, disc2 }),
            deps,
        }
    }

    /// Forward of a currency against itself.
    pub fn identity(ccy: Currency, today: Date) -> Self {
        Self {
            name: fx_forward_name(ccy, ccy),
            ccy1: ccy,
            ccy2: ccy,
            today,
            legs: None,
            deps: BTreeSet::new(),
        }
    }

    /// Currency pair `(ccy1, ccy2)`.
    pub fn pair(&self) -> (Currency, Currency) {
        (self.ccy1, self.ccy2)
    }

    /// Forward rate for delivery at `date`.
    ///
    /// # Errors
    ///
    /// Discount-curve errors propagate; `InvalidDiscountFactor` if either
    /// discount factor is not positive.
    pub fn fwd(&self, date: Date) -> Result<f64, MarketDataError> {
        let legs = match &self.legs {
            None => return Ok(1.0),
            Some(legs) => legs,
        };

        let b1 = legs.disc1.df(date)?;
        let b2 = legs.disc2.df(date)?;
        for (curve, b) in [(&legs.disc1, b1), (&legs.disc2, b2)] {
            if !(b > 0.0) {
                return Err(MarketDataError::InvalidDiscountFactor {
                    curve: curve.name().to_string(),
                    date,
                    value: b,
                });
            }
        }
        Ok(legs.spot.spot() * (b1 / b2))
    }
}

impl Curve for FxForwardCurve {
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
