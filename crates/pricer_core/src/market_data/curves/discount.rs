//! Piecewise log-linear discount curve built from tenor quotes.

use std::collections::BTreeSet;

use super::Curve;
use crate::market_data::error::MarketDataError;
use crate::market_data::names::{
    ir_discount_name, ir_tenor_name, ir_tenor_pattern, is_ir_tenor_quote, RiskFactorName, Tenor,
};
use crate::types::{Currency, Date};

/// Days per year used to scale `rate * days`.
const DAYS_PER_YEAR: f64 = 365.0;

/// Discount curve for one currency.
///
/// Built from the zero-rate quotes `IR.<tenor>.<CCY>` of the currency.
/// Cumulative zero rates `r * T` are interpolated linearly between grid
/// days, which makes discount factors log-linear. A synthetic point at day
/// 0 carries the shortest quoted rate.
///
/// The grid quantities (`r_i * T_i` and per-segment local rates) are
/// computed once at construction, so [`df`](Self::df) is a binary search
/// followed by O(1) arithmetic.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::DiscountCurve;
/// use pricer_core::types::{Currency, Date};
///
/// let today = Date::from_ymd(2017, 8, 5).unwrap();
/// let quotes = vec![
///     ("IR.30D.USD".to_string(), 0.01),
///     ("IR.360D.USD".to_string(), 0.02),
/// ];
/// let curve = DiscountCurve::new(Currency::USD, today, quotes).unwrap();
///
/// assert_eq!(curve.df(today).unwrap(), 1.0);
/// let df = curve.df(today.add_days(200)).unwrap();
/// assert!((df - 0.98950).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    name: String,
    ccy: Currency,
    today: Date,
    /// Grid days, starting with the synthetic 0.
    days: Vec<u32>,
    /// Zero rate at each grid day.
    rates: Vec<f64>,
    /// `rates[i] * days[i]`.
    rate_times_days: Vec<f64>,
    /// Slope of `r * T` on `[days[i], days[i + 1]]`.
    local_rates: Vec<f64>,
    deps: BTreeSet<String>,
}

impl DiscountCurve {
    /// Builds the curve from `(risk factor name, zero rate)` quotes.
    ///
    /// Every name must be a tenor quote `IR.<N><D|W|M|Y>.<CCY>` of `ccy`.
    /// Quotes may arrive in any order; quotes falling on the same grid day
    /// keep the lexicographically smallest name.
    ///
    /// # Errors
    ///
    /// - `CurveBuildFailure` if `quotes` is empty or a tenor is too long to
    ///   place on the grid
    /// - `InvalidCurveName` if a name is not a tenor quote of `ccy`
    /// - `NonIncreasingGrid` if a tenor falls on day 0
    pub fn new(
        ccy: Currency,
        today: Date,
        quotes: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self, MarketDataError> {
        let name = ir_discount_name(ccy);

        let mut points: Vec<(u32, String, f64)> = Vec::new();
        for (rf, rate) in quotes {
            match RiskFactorName::parse(&rf) {
                Some(RiskFactorName::IrTenor { tenor, ccy: c }) if c == ccy => {
                    match tenor.days() {
                        Some(days) => points.push((days, rf, rate)),
                        None => return Err(tenor_out_of_range(&name, &rf)),
                    }
                }
                _ if is_ir_tenor_quote(&rf, ccy) => return Err(tenor_out_of_range(&name, &rf)),
                _ => return Err(MarketDataError::InvalidCurveName { name: rf }),
            }
        }

        if points.is_empty() {
            return Err(MarketDataError::CurveBuildFailure {
                curve: name,
                reason: format!("no risk factors match {}", ir_tenor_pattern(Some(ccy))),
            });
        }

        // Every matched quote is a dependency, including same-day duplicates
        let deps: BTreeSet<String> = points.iter().map(|p| p.1.clone()).collect();

        points.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        points.dedup_by_key(|p| p.0);

        let mut days = Vec::with_capacity(points.len() + 1);
        let mut rates = Vec::with_capacity(points.len() + 1);
        days.push(0);
        rates.push(points[0].2);
        for (d, _, r) in &points {
            days.push(*d);
            rates.push(*r);
        }

        let rate_times_days: Vec<f64> = days
            .iter()
            .zip(&rates)
            .map(|(&d, &r)| r * d as f64)
            .collect();

        let mut local_rates = Vec::with_capacity(days.len() - 1);
        for i in 0..days.len() - 1 {
            let (t0, t1) = (days[i], days[i + 1]);
            if t1 <= t0 {
                return Err(MarketDataError::NonIncreasingGrid {
                    curve: name,
                    prev: t0,
                    next: t1,
                });
            }
            local_rates.push((rate_times_days[i + 1] - rate_times_days[i]) / (t1 - t0) as f64);
        }

        tracing::debug!(curve = %name, %today, points = days.len() - 1, "Built discount curve");

        Ok(Self {
            name,
            ccy,
            today,
            days,
            rates,
            rate_times_days,
            local_rates,
            deps,
        })
    }

    /// Builds the curve from typed tenors; convenient for tests and tools.
    pub fn from_tenors(
        ccy: Currency,
        today: Date,
        tenors: &[(Tenor, f64)],
    ) -> Result<Self, MarketDataError> {
        let quotes: Vec<(String, f64)> = tenors
            .iter()
            .map(|(tenor, rate)| (ir_tenor_name(*tenor, ccy), *rate))
            .collect();
        Self::new(ccy, today, quotes)
    }

    /// Currency of the curve.
    pub fn currency(&self) -> Currency {
        self.ccy
    }

    /// Last grid day (days from the anchor date).
    pub fn last_tenor_days(&self) -> u32 {
        self.days.last().copied().unwrap_or(0)
    }

    /// Grid as `(days, zero rate)`, including the synthetic day-0 point.
    pub fn grid(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.days.iter().copied().zip(self.rates.iter().copied())
    }

    /// Discount factor from the anchor date to `date`.
    ///
    /// # Errors
    ///
    /// - `BeforeAnchor` if `date` is before the anchor date
    /// - `BeyondLastTenor` if `date` is after the last grid day
    pub fn df(&self, date: Date) -> Result<f64, MarketDataError> {
        let tau = date - self.today;
        if tau < 0 {
            return Err(MarketDataError::BeforeAnchor {
                curve: self.name.clone(),
                date,
                anchor: self.today,
            });
        }

        let last = self.last_tenor_days();
        if tau > i64::from(last) {
            return Err(MarketDataError::BeyondLastTenor {
                curve: self.name.clone(),
                date,
                days: tau,
                last,
            });
        }

        if tau == i64::from(last) {
            let r_last = self.rates[self.rates.len() - 1];
            return Ok((-r_last * f64::from(last) / DAYS_PER_YEAR).exp());
        }

        // 0 <= tau < last, so the upper bound lies in 1..days.len()
        let tau = tau as u32;
        let i = self.days.partition_point(|&d| d <= tau) - 1;
        let dt = f64::from(tau - self.days[i]);
        Ok((-(self.rate_times_days[i] + self.local_rates[i] * dt) / DAYS_PER_YEAR).exp())
    }
}

fn tenor_out_of_range(curve: &str, rf: &str) -> MarketDataError {
    MarketDataError::CurveBuildFailure {
        curve: curve.to_string(),
        reason: format!("tenor of {} is too long", rf),
    }
}

impl Curve for DiscountCurve {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::names::TenorUnit;
    use crate::market_data::ErrorKind;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn today() -> Date {
        Date::from_ymd(2017, 8, 5).unwrap()
    }

    fn two_point_curve() -> DiscountCurve {
        DiscountCurve::new(
            Currency::USD,
            today(),
            vec![
                ("IR.360D.USD".to_string(), 0.02),
                ("IR.30D.USD".to_string(), 0.01),
            ],
        )
        .unwrap()
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_grid_has_synthetic_origin() {
        let curve = two_point_curve();
        let grid: Vec<_> = curve.grid().collect();
        assert_eq!(grid, vec![(0, 0.01), (30, 0.01), (360, 0.02)]);
        assert_eq!(curve.name(), "IR.DISCOUNT.USD");
        assert_eq!(curve.dependencies().len(), 2);
    }

    #[test]
    fn test_empty_quotes_fail() {
        let err = DiscountCurve::new(Currency::EUR, today(), Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CurveBuildFailure);
    }

    #[test]
    fn test_foreign_quote_rejected() {
        let err = DiscountCurve::new(
            Currency::EUR,
            today(),
            vec![("IR.1Y.USD".to_string(), 0.01)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCurveName);
    }

    #[test]
    fn test_tenor_too_long_fails_build() {
        // Both multiply past u32::MAX days
        let err = DiscountCurve::new(
            Currency::USD,
            today(),
            vec![
                ("IR.1Y.USD".to_string(), 0.01),
                ("IR.20000000Y.USD".to_string(), 0.02),
                ("IR.30000000Y.USD".to_string(), 0.05),
            ],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CurveBuildFailure);
        assert!(err.to_string().contains("IR.20000000Y.USD"));

        // Multiplier does not even fit the tenor type
        let err = DiscountCurve::new(
            Currency::USD,
            today(),
            vec![("IR.99999999999D.USD".to_string(), 0.01)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CurveBuildFailure);
        assert!(err.to_string().contains("IR.99999999999D.USD"));
    }

    #[test]
    fn test_zero_day_tenor_is_non_increasing() {
        let err = DiscountCurve::new(
            Currency::USD,
            today(),
            vec![("IR.0D.USD".to_string(), 0.01), ("IR.1Y.USD".to_string(), 0.02)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonIncreasingGrid);
    }

    #[test]
    fn test_same_day_tenors_deduplicated() {
        // 1W and 7D are both 7 days
        let curve = DiscountCurve::new(
            Currency::USD,
            today(),
            vec![
                ("IR.7D.USD".to_string(), 0.011),
                ("IR.1W.USD".to_string(), 0.010),
                ("IR.1Y.USD".to_string(), 0.02),
            ],
        )
        .unwrap();
        let grid: Vec<_> = curve.grid().collect();
        assert_eq!(grid.len(), 3);
        // "IR.1W.USD" sorts before "IR.7D.USD"
        assert_eq!(grid[1], (7, 0.010));
    }

    // ========================================
    // Discount factors
    // ========================================

    #[test]
    fn test_df_at_anchor_is_exactly_one() {
        assert_eq!(two_point_curve().df(today()).unwrap(), 1.0);
    }

    #[test]
    fn test_df_interpolated_example() {
        let curve = two_point_curve();
        let local = (0.02 * 360.0 - 0.01 * 30.0) / 330.0;
        let expected = (-(0.3 + local * 170.0) / 365.0_f64).exp();

        let df = curve.df(today().add_days(200)).unwrap();
        assert_relative_eq!(df, expected, epsilon = 1e-15);
        assert_relative_eq!(df, 0.98950, epsilon = 1e-5);
    }

    #[test]
    fn test_df_on_grid_points() {
        let curve = two_point_curve();
        assert_relative_eq!(
            curve.df(today().add_days(30)).unwrap(),
            (-0.01 * 30.0 / 365.0_f64).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            curve.df(today().add_days(360)).unwrap(),
            (-0.02 * 360.0 / 365.0_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_df_before_anchor_fails() {
        let err = two_point_curve().df(today().add_days(-1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BeforeAnchor);
    }

    #[test]
    fn test_df_beyond_last_tenor_fails() {
        let err = two_point_curve().df(today().add_days(361)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BeyondLastTenor);
    }

    #[test]
    fn test_single_quote_is_flat() {
        let curve = DiscountCurve::from_tenors(
            Currency::EUR,
            today(),
            &[(Tenor::new(2, TenorUnit::Y), 0.01)],
        )
        .unwrap();
        for days in [1_i64, 100, 365, 730] {
            assert_relative_eq!(
                curve.df(today().add_days(days)).unwrap(),
                (-0.01 * days as f64 / 365.0).exp(),
                epsilon = 1e-14
            );
        }
    }

    // ========================================
    // Properties
    // ========================================

    fn tenor_strategy() -> impl Strategy<Value = Vec<(u32, f64)>> {
        // Distinct day counts with upward-sloping positive rates
        prop::collection::btree_set(1u32..5000, 1..8).prop_flat_map(|days| {
            let n = days.len();
            (
                Just(days.into_iter().collect::<Vec<_>>()),
                prop::collection::vec(0.0001f64..0.002, n),
                0.001f64..0.05,
            )
                .prop_map(|(days, steps, base)| {
                    let mut rate = base;
                    days.into_iter()
                        .zip(steps)
                        .map(|(d, s)| {
                            rate += s;
                            (d, rate)
                        })
                        .collect()
                })
        })
    }

    fn quotes(points: &[(u32, f64)]) -> Vec<(String, f64)> {
        points
            .iter()
            .map(|(d, r)| (format!("IR.{}D.USD", d), *r))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_grid_invariant_to_quote_order(points in tenor_strategy(), seed in any::<u64>()) {
            let forward = DiscountCurve::new(Currency::USD, today(), quotes(&points)).unwrap();

            let mut shuffled = quotes(&points);
            let len = shuffled.len();
            let mut s = seed;
            for i in (1..len).rev() {
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                shuffled.swap(i, (s >> 33) as usize % (i + 1));
            }
            let permuted = DiscountCurve::new(Currency::USD, today(), shuffled).unwrap();

            let last = forward.last_tenor_days();
            prop_assert_eq!(last, permuted.last_tenor_days());
            for day in (0..=last).step_by(7) {
                let d = today().add_days(i64::from(day));
                prop_assert_eq!(forward.df(d).unwrap(), permuted.df(d).unwrap());
            }
        }

        #[test]
        fn prop_df_strictly_decreasing_for_positive_rates(points in tenor_strategy()) {
            let curve = DiscountCurve::new(Currency::USD, today(), quotes(&points)).unwrap();
            let last = curve.last_tenor_days();

            let mut prev = curve.df(today()).unwrap();
            prop_assert_eq!(prev, 1.0);
            for day in 1..=last {
                let df = curve.df(today().add_days(i64::from(day))).unwrap();
                prop_assert!(df < prev, "df not decreasing at day {}: {} >= {}", day, df, prev);
                prop_assert!(df > 0.0);
                prev = df;
            }
        }
    }
}
