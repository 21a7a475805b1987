//! Deliverable FX forward.

use std::fmt;

use pricer_core::types::{Currency, Date};

use super::format_label;
use crate::error::InstrumentError;
use crate::pricers::{FxForwardPricer, Pricer};

/// Forward on `ccy1` against `ccy2`, struck at `strike` units of `ccy2`
/// per unit of `ccy1`.
///
/// The rate is fixed on `fixing_date` and the payoff
/// `quantity * (S - strike)` in `ccy2` is settled on `settle_date`.
///
/// # Examples
///
/// ```
/// use pricer_models::trades::TradeFxForward;
/// use pricer_core::types::{Currency, Date};
///
/// let fixing = Date::from_ymd(2018, 8, 1).unwrap();
/// let settle = Date::from_ymd(2018, 8, 3).unwrap();
/// let fwd = TradeFxForward::new(Currency::EUR, Currency::USD, 1_000_000.0, 1.20, fixing, settle).unwrap();
/// assert_eq!(fwd.strike(), 1.20);
///
/// // Fixing after settlement is rejected
/// assert!(TradeFxForward::new(Currency::EUR, Currency::USD, 1.0, 1.20, settle, fixing).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FxForwardFields"))]
pub struct TradeFxForward {
    ccy1: Currency,
    ccy2: Currency,
    quantity: f64,
    strike: f64,
    fixing_date: Date,
    settle_date: Date,
}

impl TradeFxForward {
    /// Creates a validated FX forward.
    ///
    /// # Errors
    ///
    /// `InvalidInstrumentField` if the currencies are equal, the notional is
    /// zero or not finite, the strike is not a positive finite number, or
    /// the fixing date is after the settlement date.
    pub fn new(
        ccy1: Currency,
        ccy2: Currency,
        quantity: f64,
        strike: f64,
        fixing_date: Date,
        settle_date: Date,
    ) -> Result<Self, InstrumentError> {
        if ccy1 == ccy2 {
            return Err(InstrumentError::field(
                "ccy2",
                format!("must differ from ccy1, got {}/{}", ccy1, ccy2),
            ));
        }
        if !quantity.is_finite() {
            return Err(InstrumentError::field(
                "quantity",
                format!("must be finite, got {}", quantity),
            ));
        }
        if quantity == 0.0 {
            return Err(InstrumentError::field("quantity", "must not be zero"));
        }
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::field(
                "strike",
                format!("must be positive and finite, got {}", strike),
            ));
        }
        if fixing_date > settle_date {
            return Err(InstrumentError::field(
                "fixing_date",
                format!("{} is after settlement date {}", fixing_date, settle_date),
            ));
        }
        Ok(Self {
            ccy1,
            ccy2,
            quantity,
            strike,
            fixing_date,
            settle_date,
        })
    }

    /// Base currency of the pair.
    pub fn ccy1(&self) -> Currency {
        self.ccy1
    }

    /// Quote (settlement) currency of the pair.
    pub fn ccy2(&self) -> Currency {
        self.ccy2
    }

    /// Notional in `ccy1`.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Strike in `ccy2` per unit of `ccy1`.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Date the rate is fixed.
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Date the payoff is settled.
    pub fn settle_date(&self) -> Date {
        self.settle_date
    }

    /// Pricer reporting in `base_ccy`.
    pub fn pricer(&self, base_ccy: Currency) -> Pricer {
        Pricer::FxForward(FxForwardPricer::new(self, base_ccy))
    }
}

impl fmt::Display for TradeFxForward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", format_label("Quantity"), self.quantity)?;
        writeln!(f, "{}{}", format_label("Strike level"), self.strike)?;
        writeln!(f, "{}{}", format_label("Base Currency"), self.ccy1)?;
        writeln!(f, "{}{}", format_label("Quote Currency"), self.ccy2)?;
        writeln!(f, "{}{}", format_label("Fixing Date"), self.fixing_date)?;
        writeln!(f, "{}{}", format_label("Settlement Date"), self.settle_date)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FxForwardFields {
    ccy1: Currency,
    ccy2: Currency,
    quantity: f64,
    strike: f64,
    fixing_date: Date,
    settle_date: Date,
}

#[cfg(feature = "serde")]
impl TryFrom<FxForwardFields> for TradeFxForward {
    type Error = InstrumentError;

    fn try_from(f: FxForwardFields) -> Result<Self, InstrumentError> {
        TradeFxForward::new(
            f.ccy1,
            f.ccy2,
            f.quantity,
            f.strike,
            f.fixing_date,
            f.settle_date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn field_of(result: Result<TradeFxForward, InstrumentError>) -> &'static str {
        match result {
            Err(InstrumentError::InvalidInstrumentField { field, .. }) => field,
            other => panic!("Expected InvalidInstrumentField, got {:?}", other),
        }
    }

    #[test]
    fn test_new_valid() {
        let fwd = TradeFxForward::new(
            Currency::GBP,
            Currency::USD,
            -500.0,
            1.31,
            d(2018, 1, 2),
            d(2018, 1, 2),
        )
        .unwrap();
        assert_eq!(fwd.ccy1(), Currency::GBP);
        assert_eq!(fwd.ccy2(), Currency::USD);
        assert_eq!(fwd.quantity(), -500.0);
        assert_eq!(fwd.fixing_date(), fwd.settle_date());
    }

    #[test]
    fn test_validation() {
        let (fix, set) = (d(2018, 1, 2), d(2018, 1, 4));
        let eur = Currency::EUR;
        let usd = Currency::USD;

        assert_eq!(field_of(TradeFxForward::new(eur, eur, 1.0, 1.2, fix, set)), "ccy2");
        assert_eq!(field_of(TradeFxForward::new(eur, usd, 0.0, 1.2, fix, set)), "quantity");
        assert_eq!(field_of(TradeFxForward::new(eur, usd, f64::NAN, 1.2, fix, set)), "quantity");
        assert_eq!(field_of(TradeFxForward::new(eur, usd, 1.0, 0.0, fix, set)), "strike");
        assert_eq!(field_of(TradeFxForward::new(eur, usd, 1.0, -1.2, fix, set)), "strike");
        assert_eq!(
            field_of(TradeFxForward::new(eur, usd, 1.0, f64::INFINITY, fix, set)),
            "strike"
        );
        assert_eq!(field_of(TradeFxForward::new(eur, usd, 1.0, 1.2, set, fix)), "fixing_date");
    }

    #[test]
    fn test_display_labels() {
        let fwd =
            TradeFxForward::new(Currency::EUR, Currency::USD, 1.0, 1.2, d(2018, 1, 2), d(2018, 1, 4))
                .unwrap();
        let text = fwd.to_string();
        assert!(text.contains("Strike level"));
        assert!(text.contains("Settlement Date"));
        assert!(text.contains("2018-01-04"));
    }
}
