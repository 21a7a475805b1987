//! Currency codes for financial calculations.
//!
//! Risk-factor names carry currencies as three-letter ISO 4217 codes
//! (`IR.1Y.EUR`, `FX.SPOT.GBP`), so currencies are represented as a
//! validated three-letter code rather than a closed list.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let eur: Currency = "EUR".parse().unwrap();
//! assert_eq!(eur.code(), "EUR");
//! assert_ne!(eur, Currency::USD);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Three-letter ISO 4217 currency code.
///
/// Stored inline as three upper-case ASCII letters, so the type is `Copy`,
/// hashable and ordered alphabetically by code.
///
/// # Examples
///
/// ```
/// use pricer_core::types::currency::Currency;
///
/// assert_eq!(Currency::USD.code(), "USD");
///
/// // Parsing validates the shape of the code
/// assert!("GBP".parse::<Currency>().is_ok());
/// assert!("gbp".parse::<Currency>().is_err());
/// assert!("GBPX".parse::<Currency>().is_err());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Currency([u8; 3]);

impl Currency {
    /// United States Dollar, the quoting base of FX spot risk factors.
    pub const USD: Currency = Currency(*b"USD");
    /// Euro
    pub const EUR: Currency = Currency(*b"EUR");
    /// British Pound Sterling
    pub const GBP: Currency = Currency(*b"GBP");
    /// Japanese Yen
    pub const JPY: Currency = Currency(*b"JPY");
    /// Swiss Franc
    pub const CHF: Currency = Currency(*b"CHF");

    /// Returns the three-letter currency code.
    pub fn code(&self) -> &str {
        // Construction only admits ASCII upper-case letters.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses a three-letter upper-case currency code.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(CurrencyError::InvalidCode(s.to_string()));
        }
        Ok(Currency([bytes[0], bytes[1], bytes[2]]))
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, CurrencyError> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(ccy: Currency) -> Self {
        ccy.code().to_string()
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.code())
    }
}
