//! Calendar date type used as the valuation and cashflow date.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - ISO 8601 (`YYYY-MM-DD`) and compact (`YYYYMMDD`) parsing
//! - Day arithmetic (`date - date` yields whole days)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::Date;
//!
//! let today = Date::from_ymd(2017, 8, 5).unwrap();
//! let payment = Date::parse_yyyymmdd("20200201").unwrap();
//!
//! assert_eq!(payment - today, 910);
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the day arithmetic needed by the
/// curves: subtracting two dates yields the signed number of days.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Wraps a chrono date; usable in constant items.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pricer_core::types::time::Date;
    ///
    /// const EPOCH: Date = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    ///     Some(d) => Date::from_naive(d),
    ///     None => panic!("invalid epoch"),
    /// };
    /// assert_eq!(EPOCH, Date::from_ymd(1970, 1, 1).unwrap());
    /// ```
    pub const fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Parses a date in the compact `YYYYMMDD` form used by fixing files.
    ///
    /// Exactly eight ASCII digits are required.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse_yyyymmdd("20170805").unwrap();
    /// assert_eq!(date, Date::from_ymd(2017, 8, 5).unwrap());
    ///
    /// assert!(Date::parse_yyyymmdd("2017085").is_err());
    /// assert!(Date::parse_yyyymmdd("20170231").is_err());
    /// ```
    pub fn parse_yyyymmdd(s: &str) -> Result<Self, DateError> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::ParseError(format!(
                "expected YYYYMMDD, got '{}'",
                s
            )));
        }
        // All eight bytes are ASCII digits, so these parses cannot fail.
        let year: i32 = s[0..4].parse().map_err(|_| DateError::ParseError(s.into()))?;
        let month: u32 = s[4..6].parse().map_err(|_| DateError::ParseError(s.into()))?;
        let day: u32 = s[6..8].parse().map_err(|_| DateError::ParseError(s.into()))?;
        Self::from_ymd(year, month, day)
    }

    /// Returns the date `days` calendar days later (earlier if negative).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let d = Date::from_ymd(2024, 2, 28).unwrap();
    /// assert_eq!(d.add_days(1), Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(d.add_days(-28), Date::from_ymd(2024, 1, 31).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// Formats the date in the compact `YYYYMMDD` form.
    pub fn to_yyyymmdd(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_ymd_valid() {
        let date = Date::from_ymd(2017, 8, 5).unwrap();
        assert_eq!(date.year(), 2017);
        assert_eq!(date.month(), 8);
        assert_eq!(date.day(), 5);
    }

    #[test]
    fn test_date_from_ymd_invalid() {
        let result = Date::from_ymd(2023, 2, 29);
        match result {
            Err(DateError::InvalidDate { year, month, day }) => {
                assert_eq!((year, month, day), (2023, 2, 29));
            }
            _ => panic!("Expected InvalidDate error"),
        }
    }

    #[test]
    fn test_date_parse_iso() {
        let date = Date::parse("2020-02-01").unwrap();
        assert_eq!(date, Date::from_ymd(2020, 2, 1).unwrap());
        assert!(Date::parse("2020/02/01").is_err());
    }

    #[test]
    fn test_parse_yyyymmdd() {
        let date = Date::parse_yyyymmdd("20200202").unwrap();
        assert_eq!(date, Date::from_ymd(2020, 2, 2).unwrap());
        assert_eq!(date.to_yyyymmdd(), "20200202");
    }

    #[test]
    fn test_parse_yyyymmdd_rejects_malformed() {
        assert!(Date::parse_yyyymmdd("").is_err());
        assert!(Date::parse_yyyymmdd("2020-2-2").is_err());
        assert!(Date::parse_yyyymmdd("2020020a").is_err());
        assert!(Date::parse_yyyymmdd("202002021").is_err());
        assert!(Date::parse_yyyymmdd("20201301").is_err());
    }

    #[test]
    fn test_date_subtraction() {
        let today = Date::from_ymd(2017, 8, 5).unwrap();
        let pay = Date::from_ymd(2020, 2, 1).unwrap();
        assert_eq!(pay - today, 910);
        assert_eq!(today - pay, -910);
        assert_eq!(today - today, 0);
    }

    #[test]
    fn test_add_days_inverse_of_sub() {
        let today = Date::from_ymd(2017, 8, 5).unwrap();
        for days in [-400_i64, -1, 0, 1, 30, 365, 3650] {
            assert_eq!(today.add_days(days) - today, days);
        }
    }

    #[test]
    fn test_date_ordering() {
        let d1 = Date::from_ymd(2020, 2, 1).unwrap();
        let d2 = Date::from_ymd(2020, 2, 2).unwrap();
        assert!(d1 < d2);
        assert_eq!(d1.max(d2), d2);
    }

    #[test]
    fn test_date_display() {
        let date = Date::from_ymd(2017, 8, 5).unwrap();
        assert_eq!(format!("{}", date), "2017-08-05");
        assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
    }
}
