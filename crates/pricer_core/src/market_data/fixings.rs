//! Historical fixings keyed by `(name, date)`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::{LoadError, MarketDataError};
use crate::types::Date;

/// Store of historical fixings loaded from `name YYYYMMDD value` records.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::FixingDataServer;
/// use pricer_core::types::Date;
///
/// let fixings = FixingDataServer::from_reader("FX.SPOT.EUR.USD 20170801 1.18\n".as_bytes()).unwrap();
/// let d = Date::from_ymd(2017, 8, 1).unwrap();
///
/// assert_eq!(fixings.lookup("FX.SPOT.EUR.USD", d), Some(1.18));
/// assert_eq!(fixings.lookup("FX.SPOT.EUR.USD", d.add_days(1)), None);
/// assert!(fixings.get("FX.SPOT.EUR.USD", d.add_days(1)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixingDataServer {
    fixings: BTreeMap<(String, Date), f64>,
}

impl FixingDataServer {
    /// Creates an empty fixing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads fixings from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fixings = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), count = fixings.len(), "Loaded fixings");
        Ok(fixings)
    }

    /// Parses `name YYYYMMDD value` records. Blank lines are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut fixings = BTreeMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| LoadError::Io {
                path: format!("line {}", line_no),
                source,
            })?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (name, date, value) = match fields.as_slice() {
                [] => continue,
                [name, date, value] => (*name, *date, *value),
                _ => {
                    return Err(LoadError::Malformed {
                        line: line_no,
                        message: format!("expected 'name YYYYMMDD value', got '{}'", line.trim()),
                    })
                }
            };
            let date = Date::parse_yyyymmdd(date)
                .map_err(|source| LoadError::BadDate { line: line_no, source })?;
            let value: f64 = value.parse().map_err(|_| LoadError::Malformed {
                line: line_no,
                message: format!("invalid value '{}' for {}", value, name),
            })?;
            if fixings.insert((name.to_string(), date), value).is_some() {
                return Err(LoadError::Duplicate {
                    line: line_no,
                    key: format!("{} {}", name, date.to_yyyymmdd()),
                });
            }
        }
        Ok(Self { fixings })
    }

    /// Adds a fixing, replacing any previous value for the same key.
    pub fn insert(&mut self, name: impl Into<String>, date: Date, value: f64) {
        self.fixings.insert((name.into(), date), value);
    }

    /// Returns the fixing, failing with `MissingFixing` if absent.
    pub fn get(&self, name: &str, date: Date) -> Result<f64, MarketDataError> {
        self.lookup(name, date).ok_or_else(|| MarketDataError::MissingFixing {
            name: name.to_string(),
            date,
        })
    }

    /// Returns the fixing if present.
    pub fn lookup(&self, name: &str, date: Date) -> Option<f64> {
        self.fixings.get(&(name.to_string(), date)).copied()
    }

    /// Number of fixings.
    pub fn len(&self) -> usize {
        self.fixings.len()
    }

    /// Returns `true` if no fixings are stored.
    pub fn is_empty(&self) -> bool {
        self.fixings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::ErrorKind;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_and_lookup() {
        let data = "FX.SPOT.EUR.USD 20170801 1.18\nFX.SPOT.EUR.USD 20170802 1.19\n\nFX.SPOT.GBP.USD 20170801 1.31\n";
        let fixings = FixingDataServer::from_reader(data.as_bytes()).unwrap();
        assert_eq!(fixings.len(), 3);
        assert_eq!(fixings.lookup("FX.SPOT.EUR.USD", d(2017, 8, 2)), Some(1.19));
        assert_eq!(fixings.get("FX.SPOT.GBP.USD", d(2017, 8, 1)).unwrap(), 1.31);
    }

    #[test]
    fn test_get_missing_is_error() {
        let fixings = FixingDataServer::new();
        let err = fixings.get("FX.SPOT.EUR.USD", d(2017, 8, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingFixing);
    }

    #[test]
    fn test_duplicate_rejected() {
        let data = "FX.SPOT.EUR.USD 20170801 1.18\nFX.SPOT.EUR.USD 20170801 1.19\n";
        match FixingDataServer::from_reader(data.as_bytes()) {
            Err(LoadError::Duplicate { line, key }) => {
                assert_eq!(line, 2);
                assert_eq!(key, "FX.SPOT.EUR.USD 20170801");
            }
            other => panic!("Expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let data = "FX.SPOT.EUR.USD 2017081 1.18\n";
        assert!(matches!(
            FixingDataServer::from_reader(data.as_bytes()),
            Err(LoadError::BadDate { line: 1, .. })
        ));
    }

    #[test]
    fn test_insert() {
        let mut fixings = FixingDataServer::new();
        fixings.insert("FX.SPOT.EUR.USD", d(2017, 8, 5), 1.2);
        assert_eq!(fixings.lookup("FX.SPOT.EUR.USD", d(2017, 8, 5)), Some(1.2));
    }
}
