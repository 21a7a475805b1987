//! Market state: risk-factor snapshot plus a cache of built curves.
//!
//! A [`Market`] pulls risk factors lazily from a shared [`RiskFactorStore`]
//! and builds curves on first request. Built curves are immutable and held
//! behind `Arc`, so cloning a market copies the name -> curve mapping while
//! sharing the curve objects themselves.
//!
//! Bumping risk factors with [`Market::set_risk_factors`] evicts every
//! cached curve that consumed a changed name and builds a fresh object in
//! its place. Curves held by other clones are never touched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{Market, RiskFactorStore};
//! use pricer_core::types::Date;
//!
//! let store: RiskFactorStore = vec![("IR.1Y.USD", 0.02), ("IR.2Y.USD", 0.025)]
//!     .into_iter()
//!     .collect();
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let mut market = Market::new(Arc::new(store), today);
//!
//! let curve = market.get_discount_curve("IR.DISCOUNT.USD").unwrap();
//! assert_eq!(curve.df(today).unwrap(), 1.0);
//!
//! // Bumping a dependency replaces the cached curve
//! market.set_risk_factors(&[("IR.1Y.USD".to_string(), 0.021)]).unwrap();
//! let bumped = market.get_discount_curve("IR.DISCOUNT.USD").unwrap();
//! assert!(!Arc::ptr_eq(&curve, &bumped));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use regex::Regex;

use super::curves::{CurveHandle, DiscountCurve, FxForwardCurve, FxSpotCurve};
use super::error::MarketDataError;
use super::names::{
    fx_forward_name, fx_spot_name, ir_discount_name, ir_tenor_pattern, RiskFactorName,
    FX_BASE_CURRENCY,
};
use super::store::RiskFactorStore;
use crate::types::{Currency, Date};

/// Risk-factor snapshot and curve cache anchored at a valuation date.
#[derive(Debug, Clone)]
pub struct Market {
    today: Date,
    store: Arc<RiskFactorStore>,
    /// Risk factors fetched so far, including bumped values.
    risk_factors: BTreeMap<String, f64>,
    curves: HashMap<String, CurveHandle>,
    /// Curves evicted by a bump; may be rebuilt even when disconnected.
    evicted: HashSet<String>,
    connected: bool,
}

impl Market {
    /// Creates a connected market with empty caches.
    pub fn new(store: Arc<RiskFactorStore>, today: Date) -> Self {
        Self {
            today,
            store,
            risk_factors: BTreeMap::new(),
            curves: HashMap::new(),
            evicted: HashSet::new(),
            connected: true,
        }
    }

    /// Valuation date.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Backing store.
    pub fn store(&self) -> &RiskFactorStore {
        &self.store
    }

    /// Returns `false` once [`disconnect`](Self::disconnect) has been called.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Permanently stops fetching from the backing store. Idempotent.
    ///
    /// Cached risk factors and curves remain servable.
    pub fn disconnect(&mut self) {
        if self.connected {
            tracing::debug!(
                risk_factors = self.risk_factors.len(),
                curves = self.curves.len(),
                "Market disconnected"
            );
        }
        self.connected = false;
    }

    /// Exact risk-factor lookup, fetching from the store on a cache miss.
    ///
    /// # Errors
    ///
    /// `UnknownRiskFactor` if the name is not cached and either the market
    /// is disconnected or the store does not hold it.
    pub fn get_value(&mut self, name: &str) -> Result<f64, MarketDataError> {
        if let Some(value) = self.risk_factors.get(name) {
            return Ok(*value);
        }
        let value = if self.connected {
            self.store.get(name)
        } else {
            None
        };
        match value {
            Some(value) => {
                self.risk_factors.insert(name.to_string(), value);
                Ok(value)
            }
            None => Err(MarketDataError::UnknownRiskFactor {
                name: name.to_string(),
            }),
        }
    }

    /// Cached `(name, value)` pairs whose whole name matches `pattern`,
    /// in lexicographic order.
    ///
    /// Only risk factors already fetched into this market are considered.
    pub fn match_risk_factors(&self, pattern: &str) -> Result<Vec<(String, f64)>, MarketDataError> {
        let re = anchored(pattern)?;
        Ok(self
            .risk_factors
            .iter()
            .filter(|(name, _)| re.is_match(name))
            .map(|(name, value)| (name.clone(), *value))
            .collect())
    }

    /// Overwrites risk-factor values and rebuilds every cached curve that
    /// consumed any of them.
    ///
    /// The update is atomic with respect to unknown names: if any name is
    /// neither cached nor available from the store, nothing changes.
    /// Rebuilt curves are new objects; curves shared with clones of this
    /// market are left as they were.
    ///
    /// A curve that fails to rebuild stays evicted and reports its error on
    /// the next request.
    pub fn set_risk_factors(&mut self, values: &[(String, f64)]) -> Result<(), MarketDataError> {
        for (name, _) in values {
            let known = self.risk_factors.contains_key(name)
                || (self.connected && self.store.get(name).is_some());
            if !known {
                return Err(MarketDataError::UnknownRiskFactor { name: name.clone() });
            }
        }

        let changed: BTreeSet<&str> = values.iter().map(|(name, _)| name.as_str()).collect();
        for (name, value) in values {
            self.risk_factors.insert(name.clone(), *value);
        }

        let mut stale: Vec<CurveHandle> = self
            .curves
            .values()
            .filter(|curve| curve.dependencies().iter().any(|d| changed.contains(d.as_str())))
            .cloned()
            .collect();
        if stale.is_empty() {
            return Ok(());
        }
        stale.sort_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.name().cmp(b.name())));

        for curve in &stale {
            self.curves.remove(curve.name());
            self.evicted.insert(curve.name().to_string());
        }
        tracing::debug!(count = stale.len(), "Evicted curves after risk-factor update");

        for curve in &stale {
            if let Err(err) = self.rebuild(curve) {
                tracing::debug!(curve = curve.name(), error = %err, "Curve rebuild failed");
            }
        }
        Ok(())
    }

    /// Discount curve `IR.DISCOUNT.<CCY>`, built on first request.
    ///
    /// # Errors
    ///
    /// - `InvalidCurveName` if `name` is not a discount curve name
    /// - `MarketDisconnected` on a cache miss after disconnect
    /// - construction errors from [`DiscountCurve::new`]
    pub fn get_discount_curve(&mut self, name: &str) -> Result<Arc<DiscountCurve>, MarketDataError> {
        match RiskFactorName::parse(name) {
            Some(RiskFactorName::IrDiscount(ccy)) => self.discount_curve(ccy),
            _ => Err(invalid_name(name)),
        }
    }

    /// FX spot curve `FX.SPOT.<CCY1>[.<CCY2>]`; the short form is against USD.
    pub fn get_fx_spot_curve(&mut self, name: &str) -> Result<Arc<FxSpotCurve>, MarketDataError> {
        match RiskFactorName::parse(name) {
            Some(RiskFactorName::FxSpot { ccy1, ccy2 }) => {
                self.fx_spot_curve(ccy1, ccy2.unwrap_or(FX_BASE_CURRENCY))
            }
            _ => Err(invalid_name(name)),
        }
    }

    /// FX forward curve `FX.FWD.<CCY1>.<CCY2>`.
    pub fn get_fx_forward_curve(&mut self, name: &str) -> Result<Arc<FxForwardCurve>, MarketDataError> {
        match RiskFactorName::parse(name) {
            Some(RiskFactorName::FxForward { ccy1, ccy2 }) => self.fx_forward_curve(ccy1, ccy2),
            _ => Err(invalid_name(name)),
        }
    }

    /// Discount curve for `ccy`.
    pub fn discount_curve(&mut self, ccy: Currency) -> Result<Arc<DiscountCurve>, MarketDataError> {
        let name = ir_discount_name(ccy);
        if let Some(CurveHandle::Discount(curve)) = self.curves.get(&name) {
            return Ok(Arc::clone(curve));
        }
        self.ensure_can_build(&name)?;

        let re = anchored(&ir_tenor_pattern(Some(ccy)))?;
        let mut quotes = Vec::new();
        for key in self.match_keys(&re) {
            let value = self.get_value(&key)?;
            quotes.push((key, value));
        }
        let curve = Arc::new(DiscountCurve::new(ccy, self.today, quotes)?);
        self.insert(name, CurveHandle::Discount(Arc::clone(&curve)));
        Ok(curve)
    }

    /// Spot curve of `ccy1` in `ccy2`.
    pub fn fx_spot_curve(
        &mut self,
        ccy1: Currency,
        ccy2: Currency,
    ) -> Result<Arc<FxSpotCurve>, MarketDataError> {
        let name = fx_spot_name(ccy1, ccy2);
        if let Some(CurveHandle::FxSpot(curve)) = self.curves.get(&name) {
            return Ok(Arc::clone(curve));
        }
        self.ensure_can_build(&name)?;

        let today = self.today;
        let curve = Arc::new(FxSpotCurve::new(ccy1, ccy2, today, |rf| self.get_value(rf))?);
        self.insert(name, CurveHandle::FxSpot(Arc::clone(&curve)));
        Ok(curve)
    }

    /// Forward curve of `ccy1` in `ccy2`.
    pub fn fx_forward_curve(
        &mut self,
        ccy1: Currency,
        ccy2: Currency,
    ) -> Result<Arc<FxForwardCurve>, MarketDataError> {
        let name = fx_forward_name(ccy1, ccy2);
        if let Some(CurveHandle::FxForward(curve)) = self.curves.get(&name) {
            return Ok(Arc::clone(curve));
        }
        self.ensure_can_build(&name)?;

        let curve = if ccy1 == ccy2 {
            FxForwardCurve::identity(ccy1, self.today)
        } else {
            let spot = self.fx_spot_curve(ccy1, ccy2)?;
            let disc1 = self.discount_curve(ccy1)?;
            let disc2 = self.discount_curve(ccy2)?;
            FxForwardCurve::new(self.today, spot, disc1, disc2)
        };
        let curve = Arc::new(curve);
        self.insert(name, CurveHandle::FxForward(Arc::clone(&curve)));
        Ok(curve)
    }

    /// Spot rate of `ccy1` in `ccy2`.
    pub fn fx_spot(&mut self, ccy1: Currency, ccy2: Currency) -> Result<f64, MarketDataError> {
        Ok(self.fx_spot_curve(ccy1, ccy2)?.spot())
    }

    /// Cached curve by name, without building.
    pub fn cached_curve(&self, name: &str) -> Option<&CurveHandle> {
        self.curves.get(name)
    }

    /// Names of all cached curves, sorted.
    pub fn cached_curve_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.curves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn ensure_can_build(&self, name: &str) -> Result<(), MarketDataError> {
        if self.connected || self.evicted.contains(name) {
            Ok(())
        } else {
            Err(MarketDataError::MarketDisconnected {
                name: name.to_string(),
            })
        }
    }

    fn insert(&mut self, name: String, curve: CurveHandle) {
        tracing::debug!(curve = %name, "Cached curve");
        self.evicted.remove(&name);
        self.curves.insert(name, curve);
    }

    /// Keys matching `re`: from the store while connected, otherwise from
    /// the cached snapshot.
    fn match_keys(&self, re: &Regex) -> Vec<String> {
        if self.connected {
            self.store.match_names(re)
        } else {
            self.risk_factors
                .keys()
                .filter(|name| re.is_match(name))
                .cloned()
                .collect()
        }
    }

    fn rebuild(&mut self, stale: &CurveHandle) -> Result<(), MarketDataError> {
        match stale {
            CurveHandle::Discount(c) => self.discount_curve(c.currency()).map(|_| ()),
            CurveHandle::FxSpot(c) => {
                let (ccy1, ccy2) = c.pair();
                self.fx_spot_curve(ccy1, ccy2).map(|_| ())
            }
            CurveHandle::FxForward(c) => {
                let (ccy1, ccy2) = c.pair();
                self.fx_forward_curve(ccy1, ccy2).map(|_| ())
            }
        }
    }
}

/// Compiles `pattern` so that it must match the whole name.
fn anchored(pattern: &str) -> Result<Regex, MarketDataError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| MarketDataError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn invalid_name(name: &str) -> MarketDataError {
    MarketDataError::InvalidCurveName {
        name: name.to_string(),
    }
}
