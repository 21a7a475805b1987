//! Flat risk-factor store backing a [`Market`](super::Market).
//!
//! The store is an immutable snapshot of `name -> value` quotes, loaded once
//! from a whitespace-separated file:
//!
//! ```text
//! IR.1W.USD   0.0105
//! IR.1Y.USD   0.0132
//! FX.SPOT.EUR 1.1805
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use super::error::LoadError;

/// Immutable `name -> value` snapshot, ordered by name.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::RiskFactorStore;
/// use regex::Regex;
///
/// let data = "IR.1Y.USD 0.02\nIR.6M.USD 0.015\nFX.SPOT.EUR 1.18\n";
/// let store = RiskFactorStore::from_reader(data.as_bytes()).unwrap();
///
/// assert_eq!(store.get("FX.SPOT.EUR"), Some(1.18));
/// let usd = store.match_names(&Regex::new(r"^IR\..*\.USD$").unwrap());
/// assert_eq!(usd, vec!["IR.1Y.USD".to_string(), "IR.6M.USD".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskFactorStore {
    values: BTreeMap<String, f64>,
}

impl RiskFactorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a file of `name value` records.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), count = store.len(), "Loaded risk factors");
        Ok(store)
    }

    /// Parses `name value` records, one per line. Blank lines are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut values = BTreeMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| LoadError::Io {
                path: format!("line {}", line_no),
                source,
            })?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (name, value) = match fields.as_slice() {
                [] => continue,
                [name, value] => (*name, *value),
                _ => {
                    return Err(LoadError::Malformed {
                        line: line_no,
                        message: format!("expected 'name value', got '{}'", line.trim()),
                    })
                }
            };
            let value: f64 = value.parse().map_err(|_| LoadError::Malformed {
                line: line_no,
                message: format!("invalid value '{}' for {}", value, name),
            })?;
            if values.insert(name.to_string(), value).is_some() {
                return Err(LoadError::Duplicate {
                    line: line_no,
                    key: name.to_string(),
                });
            }
        }
        Ok(Self { values })
    }

    /// Exact lookup.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Names matching `pattern`, in lexicographic order.
    pub fn match_names(&self, pattern: &Regex) -> Vec<String> {
        self.values
            .keys()
            .filter(|name| pattern.is_match(name))
            .cloned()
            .collect()
    }

    /// Number of risk factors.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the store holds no risk factors.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for RiskFactorStore {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, f64)> for RiskFactorStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}
