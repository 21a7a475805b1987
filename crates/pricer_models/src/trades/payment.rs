//! Single cash payment.

use std::fmt;

use pricer_core::types::{Currency, Date};

use super::format_label;
use crate::error::InstrumentError;
use crate::pricers::{PaymentPricer, Pricer};

/// Payment of `quantity` units of `ccy` on `delivery_date`.
///
/// # Examples
///
/// ```
/// use pricer_models::trades::TradePayment;
/// use pricer_core::types::{Currency, Date};
///
/// let pay = TradePayment::new(Currency::USD, 10.0, Date::from_ymd(2020, 2, 1).unwrap()).unwrap();
/// assert_eq!(pay.quantity(), 10.0);
///
/// assert!(TradePayment::new(Currency::USD, f64::NAN, Date::from_ymd(2020, 2, 1).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PaymentFields"))]
pub struct TradePayment {
    ccy: Currency,
    quantity: f64,
    delivery_date: Date,
}

impl TradePayment {
    /// Creates a validated payment. The quantity must be finite.
    pub fn new(ccy: Currency, quantity: f64, delivery_date: Date) -> Result<Self, InstrumentError> {
        if !quantity.is_finite() {
            return Err(InstrumentError::field(
                "quantity",
                format!("must be finite, got {}", quantity),
            ));
        }
        Ok(Self {
            ccy,
            quantity,
            delivery_date,
        })
    }

    /// Payment currency.
    pub fn ccy(&self) -> Currency {
        self.ccy
    }

    /// Amount paid.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Delivery date.
    pub fn delivery_date(&self) -> Date {
        self.delivery_date
    }

    /// Pricer reporting in `base_ccy`.
    pub fn pricer(&self, base_ccy: Currency) -> Pricer {
        Pricer::Payment(PaymentPricer::new(self, base_ccy))
    }
}

impl fmt::Display for TradePayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", format_label("Quantity"), self.quantity)?;
        writeln!(f, "{}{}", format_label("Currency"), self.ccy)?;
        writeln!(f, "{}{}", format_label("Delivery Date"), self.delivery_date)
    }
}

/// Unvalidated wire form.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PaymentFields {
    ccy: Currency,
    quantity: f64,
    delivery_date: Date,
}

#[cfg(feature = "serde")]
impl TryFrom<PaymentFields> for TradePayment {
    type Error = InstrumentError;

    fn try_from(f: PaymentFields) -> Result<Self, InstrumentError> {
        TradePayment::new(f.ccy, f.quantity, f.delivery_date)
    }
}
