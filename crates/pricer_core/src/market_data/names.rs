//! Risk-factor and curve naming convention.
//!
//! Every quantity in the market is addressed by a dotted name:
//!
//! | Name                      | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `IR.<N><D\|W\|M\|Y>.<CCY>` | zero-rate quote at one tenor               |
//! | `IR.DISCOUNT.<CCY>`       | discount curve built from the tenor quotes |
//! | `FX.SPOT.<CCY>`           | spot rate of `CCY` against USD (risk factor) |
//! | `FX.SPOT.<CCY1>.<CCY2>`   | spot curve for an arbitrary pair           |
//! | `FX.FWD.<CCY1>.<CCY2>`    | forward curve for a pair                   |
//!
//! Names are parsed once into [`RiskFactorName`]; regular expressions are
//! only used at the store boundary, through the pattern helpers below.
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::names::{RiskFactorName, Tenor, TenorUnit};
//! use pricer_core::types::Currency;
//!
//! let name = RiskFactorName::parse("IR.6M.EUR").unwrap();
//! assert_eq!(
//!     name,
//!     RiskFactorName::IrTenor { tenor: Tenor::new(6, TenorUnit::M), ccy: Currency::EUR }
//! );
//! assert_eq!(name.to_string(), "IR.6M.EUR");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::types::Currency;

/// Prefix shared by all interest-rate names.
pub const IR_PREFIX: &str = "IR.";
/// Prefix of discount curve names.
pub const IR_DISCOUNT_PREFIX: &str = "IR.DISCOUNT.";
/// Prefix of FX spot names.
pub const FX_SPOT_PREFIX: &str = "FX.SPOT.";
/// Prefix of FX forward names.
pub const FX_FORWARD_PREFIX: &str = "FX.FWD.";

/// Currency against which all `FX.SPOT.<CCY>` risk factors are quoted.
pub const FX_BASE_CURRENCY: Currency = Currency::USD;

/// Name of the discount curve for `ccy`.
pub fn ir_discount_name(ccy: Currency) -> String {
    format!("{}{}", IR_DISCOUNT_PREFIX, ccy)
}

/// Name of the zero-rate quote for `ccy` at `tenor`.
pub fn ir_tenor_name(tenor: Tenor, ccy: Currency) -> String {
    format!("{}{}.{}", IR_PREFIX, tenor, ccy)
}

/// Full-form spot curve name `FX.SPOT.CCY1.CCY2`.
///
/// Also the name under which historical fixings of the pair are stored.
pub fn fx_spot_name(ccy1: Currency, ccy2: Currency) -> String {
    format!("{}{}.{}", FX_SPOT_PREFIX, ccy1, ccy2)
}

/// Name of the spot risk factor `FX.SPOT.CCY` (quoted against USD).
pub fn fx_spot_risk_factor_name(ccy: Currency) -> String {
    format!("{}{}", FX_SPOT_PREFIX, ccy)
}

/// Forward curve name `FX.FWD.CCY1.CCY2`.
pub fn fx_forward_name(ccy1: Currency, ccy2: Currency) -> String {
    format!("{}{}.{}", FX_FORWARD_PREFIX, ccy1, ccy2)
}

/// Anchored pattern matching the tenor quotes of one currency, or of all
/// currencies when `ccy` is `None`.
///
/// ```
/// use pricer_core::market_data::names::ir_tenor_pattern;
/// use pricer_core::types::Currency;
///
/// assert_eq!(ir_tenor_pattern(Some(Currency::EUR)), r"^IR\.[0-9]+[DWMY]\.EUR$");
/// ```
pub fn ir_tenor_pattern(ccy: Option<Currency>) -> String {
    match ccy {
        Some(ccy) => format!(r"^IR\.[0-9]+[DWMY]\.{}$", ccy),
        None => r"^IR\.[0-9]+[DWMY]\.[A-Z]{3}$".to_string(),
    }
}

/// Whether `name` has the shape `IR.<N><D|W|M|Y>.<CCY>` for `ccy`, the same
/// names `ir_tenor_pattern(Some(ccy))` matches.
///
/// Unlike [`RiskFactorName::parse`] this accepts multipliers too large to
/// represent as a [`Tenor`].
pub fn is_ir_tenor_quote(name: &str, ccy: Currency) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    match parts.as_slice() {
        ["IR", tenor, c] if *c == ccy.code() => match tenor.len().checked_sub(1) {
            Some(n) if n > 0 => {
                let (digits, unit) = tenor.split_at(n);
                digits.bytes().all(|b| b.is_ascii_digit())
                    && unit.chars().next().and_then(TenorUnit::from_char).is_some()
            }
            _ => false,
        },
        _ => false,
    }
}

/// Anchored pattern matching every `FX.SPOT.<CCY>` risk factor.
pub fn fx_spot_pattern() -> String {
    r"^FX\.SPOT\.[A-Z]{3}$".to_string()
}

/// Unit of a tenor code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TenorUnit {
    /// Days (1 day)
    D,
    /// Weeks (7 days)
    W,
    /// Months (30 days)
    M,
    /// Years (365 days)
    Y,
}

impl TenorUnit {
    /// Fixed number of days per unit.
    pub fn days(self) -> u32 {
        match self {
            TenorUnit::D => 1,
            TenorUnit::W => 7,
            TenorUnit::M => 30,
            TenorUnit::Y => 365,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'D' => Some(TenorUnit::D),
            'W' => Some(TenorUnit::W),
            'M' => Some(TenorUnit::M),
            'Y' => Some(TenorUnit::Y),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            TenorUnit::D => 'D',
            TenorUnit::W => 'W',
            TenorUnit::M => 'M',
            TenorUnit::Y => 'Y',
        }
    }
}

/// Tenor code such as `30D`, `2W`, `6M` or `10Y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tenor {
    /// Integer multiplier
    pub count: u32,
    /// Unit
    pub unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    pub fn new(count: u32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Day offset of the tenor from the anchor date, or `None` if it does
    /// not fit in a `u32`.
    ///
    /// ```
    /// use pricer_core::market_data::names::Tenor;
    ///
    /// assert_eq!("2W".parse::<Tenor>().unwrap().days(), Some(14));
    /// assert_eq!("6M".parse::<Tenor>().unwrap().days(), Some(180));
    /// assert_eq!("10Y".parse::<Tenor>().unwrap().days(), Some(3650));
    /// assert_eq!("20000000Y".parse::<Tenor>().unwrap().days(), None);
    /// ```
    pub fn days(&self) -> Option<u32> {
        self.count.checked_mul(self.unit.days())
    }
}

impl FromStr for Tenor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let unit = s.chars().last().and_then(TenorUnit::from_char).ok_or(())?;
        let digits = &s[..s.len() - 1];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        let count = digits.parse().map_err(|_| ())?;
        Ok(Tenor { count, unit })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.as_char())
    }
}

/// Structured form of a risk-factor or curve name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RiskFactorName {
    /// `IR.<tenor>.<CCY>`
    IrTenor {
        /// Quoted tenor
        tenor: Tenor,
        /// Currency
        ccy: Currency,
    },
    /// `IR.DISCOUNT.<CCY>`
    IrDiscount(Currency),
    /// `FX.SPOT.<CCY1>` or `FX.SPOT.<CCY1>.<CCY2>`
    FxSpot {
        /// First currency
        ccy1: Currency,
        /// Second currency; `None` means USD
        ccy2: Option<Currency>,
    },
    /// `FX.FWD.<CCY1>.<CCY2>`
    FxForward {
        /// First currency
        ccy1: Currency,
        /// Second currency
        ccy2: Currency,
    },
}

impl RiskFactorName {
    /// Parses a dotted name, returning `None` if it follows no known form.
    ///
    /// ```
    /// use pricer_core::market_data::names::RiskFactorName;
    /// use pricer_core::types::Currency;
    ///
    /// assert_eq!(
    ///     RiskFactorName::parse("FX.SPOT.EUR"),
    ///     Some(RiskFactorName::FxSpot { ccy1: Currency::EUR, ccy2: None })
    /// );
    /// assert_eq!(RiskFactorName::parse("IR.1X.USD"), None);
    /// assert_eq!(RiskFactorName::parse("EQ.SPOT.AAPL"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            ["IR", "DISCOUNT", ccy] => Some(RiskFactorName::IrDiscount(ccy.parse().ok()?)),
            ["IR", tenor, ccy] => Some(RiskFactorName::IrTenor {
                tenor: tenor.parse().ok()?,
                ccy: ccy.parse().ok()?,
            }),
            ["FX", "SPOT", ccy1] => Some(RiskFactorName::FxSpot {
                ccy1: ccy1.parse().ok()?,
                ccy2: None,
            }),
            ["FX", "SPOT", ccy1, ccy2] => Some(RiskFactorName::FxSpot {
                ccy1: ccy1.parse().ok()?,
                ccy2: Some(ccy2.parse().ok()?),
            }),
            ["FX", "FWD", ccy1, ccy2] => Some(RiskFactorName::FxForward {
                ccy1: ccy1.parse().ok()?,
                ccy2: ccy2.parse().ok()?,
            }),
            _ => None,
        }
    }

    /// Currency of an IR name; first currency of an FX name.
    pub fn currency(&self) -> Currency {
        match self {
            RiskFactorName::IrTenor { ccy, .. } | RiskFactorName::IrDiscount(ccy) => *ccy,
            RiskFactorName::FxSpot { ccy1, .. } | RiskFactorName::FxForward { ccy1, .. } => *ccy1,
        }
    }
}

impl fmt::Display for RiskFactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFactorName::IrTenor { tenor, ccy } => write!(f, "{}", ir_tenor_name(*tenor, *ccy)),
            RiskFactorName::IrDiscount(ccy) => write!(f, "{}", ir_discount_name(*ccy)),
            RiskFactorName::FxSpot { ccy1, ccy2: None } => {
                write!(f, "{}", fx_spot_risk_factor_name(*ccy1))
            }
            RiskFactorName::FxSpot { ccy1, ccy2: Some(ccy2) } => {
                write!(f, "{}", fx_spot_name(*ccy1, *ccy2))
            }
            RiskFactorName::FxForward { ccy1, ccy2 } => {
                write!(f, "{}", fx_forward_name(*ccy1, *ccy2))
            }
        }
    }
}
