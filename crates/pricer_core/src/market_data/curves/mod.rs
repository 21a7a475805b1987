//! Market curves built from risk factors.
//!
//! This module provides:
//! - [`Curve`]: Common trait (name, anchor date, risk-factor dependencies)
//! - [`DiscountCurve`]: Piecewise log-linear discount curve per currency
//! - [`FxSpotCurve`]: Direct, inverse and cross FX spot rates
//! - [`FxForwardCurve`]: Covered-interest-parity FX forwards
//! - [`CurveHandle`]: Type-erased shared handle stored in the market cache

mod discount;
mod fx_forward;
mod fx_spot;
mod traits;

use std::collections::BTreeSet;
use std::sync::Arc;

pub use discount::DiscountCurve;
pub use fx_forward::FxForwardCurve;
pub use fx_spot::FxSpotCurve;
pub use traits::Curve;

/// Shared handle to any built curve.
///
/// Curves are immutable, so handles are freely shared between market
/// clones. Dispatch is static over the closed set of curve kinds.
#[derive(Debug, Clone)]
pub enum CurveHandle {
    /// Discount curve
    Discount(Arc<DiscountCurve>),
    /// FX spot curve
    FxSpot(Arc<FxSpotCurve>),
    /// FX forward curve
    FxForward(Arc<FxForwardCurve>),
}

impl CurveHandle {
    /// Cache key of the curve.
    pub fn name(&self) -> &str {
        match self {
            CurveHandle::Discount(c) => c.name(),
            CurveHandle::FxSpot(c) => c.name(),
            CurveHandle::FxForward(c) => c.name(),
        }
    }

    /// Risk factors consumed by the curve.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        match self {
            CurveHandle::Discount(c) => c.dependencies(),
            CurveHandle::FxSpot(c) => c.dependencies(),
            CurveHandle::FxForward(c) => c.dependencies(),
        }
    }

    /// Rebuild order: components before the curves composed from them.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            CurveHandle::Discount(_) => 0,
            CurveHandle::FxSpot(_) => 1,
            CurveHandle::FxForward(_) => 2,
        }
    }
}
