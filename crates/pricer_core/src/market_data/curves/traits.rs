//! Common curve trait.

use std::collections::BTreeSet;

use crate::types::Date;

/// Behaviour shared by every market curve.
///
/// Curves are immutable once built. A curve records the risk-factor names
/// it consumed during construction so that the owning market can tell
/// which cached curves a bump invalidates.
///
/// # Contract
///
/// - `name()` is the cache key under which the curve is stored
/// - `today()` is the anchor date the curve was built against
/// - `dependencies()` lists every risk factor read during construction
pub trait Curve {
    /// Cache key of the curve, e.g. `IR.DISCOUNT.USD`.
    fn name(&self) -> &str;

    /// Anchor (valuation) date.
    fn today(&self) -> Date;

    /// Risk-factor names read while building the curve.
    fn dependencies(&self) -> &BTreeSet<String>;
}
