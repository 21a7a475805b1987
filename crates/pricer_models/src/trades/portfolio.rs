//! Portfolio files: a JSON array of trades tagged by `type`.
//!
//! ```json
//! [
//!   { "type": "payment", "ccy": "USD", "quantity": 10.0, "delivery_date": "2020-02-01" }
//! ]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::Trade;
use crate::error::PortfolioError;

/// Loads a portfolio file. Every trade is validated on load.
pub fn load_portfolio(path: impl AsRef<Path>) -> Result<Vec<Trade>, PortfolioError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PortfolioError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let trades = portfolio_from_reader(BufReader::new(file)).map_err(|source| {
        PortfolioError::Format {
            path: path.display().to_string(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), trades = trades.len(), "Loaded portfolio");
    Ok(trades)
}

/// Saves a portfolio file, overwriting any existing file.
pub fn save_portfolio(path: impl AsRef<Path>, trades: &[Trade]) -> Result<(), PortfolioError> {
    let path = path.as_ref();
    let io_err = |source| PortfolioError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    portfolio_to_writer(&mut writer, trades).map_err(|source| PortfolioError::Format {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    tracing::debug!(path = %path.display(), trades = trades.len(), "Saved portfolio");
    Ok(())
}

/// Parses a portfolio from JSON.
pub fn portfolio_from_reader(reader: impl Read) -> Result<Vec<Trade>, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Writes a portfolio as pretty-printed JSON.
pub fn portfolio_to_writer(writer: impl Write, trades: &[Trade]) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trades::{TradeFxForward, TradePayment};
    use pricer_core::types::{Currency, Date};
    use proptest::prelude::*;
    use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn sample() -> Vec<Trade> {
        vec![
            TradePayment::new(Currency::USD, 10.0, d(2020, 2, 1)).unwrap().into(),
            TradePayment::new(Currency::EUR, 20.0, d(2020, 2, 2)).unwrap().into(),
            TradeFxForward::new(Currency::EUR, Currency::USD, 1000.0, 1.19, d(2018, 8, 1), d(2018, 8, 3))
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        save_portfolio(&path, &sample()).unwrap();
        let loaded = load_portfolio(&path).unwrap();
        assert_eq!(loaded, sample());

        // Saving the reloaded portfolio reproduces the same file
        let first = std::fs::read_to_string(&path).unwrap();
        save_portfolio(&path, &loaded).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_type_tags() {
        let mut buf = Vec::new();
        portfolio_to_writer(&mut buf, &sample()).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains(r#""type": "payment""#));
        assert!(json.contains(r#""type": "fx_forward""#));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"[{"type": "swap", "ccy": "USD"}]"#;
        assert!(portfolio_from_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_invalid_trade_rejected_on_load() {
        let json = r#"[{"type": "fx_forward", "ccy1": "EUR", "ccy2": "EUR", "quantity": 1.0,
                        "strike": 1.2, "fixing_date": "2018-08-01", "settle_date": "2018-08-03"}]"#;
        let err = portfolio_from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ccy2"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_portfolio(dir.path().join("nope.json"));
        assert!(matches!(result, Err(PortfolioError::Io { .. })));
    }

    fn round_trip(trades: &[Trade]) -> Vec<Trade> {
        let mut buf = Vec::new();
        portfolio_to_writer(&mut buf, trades).unwrap();
        portfolio_from_reader(buf.as_slice()).unwrap()
    }

    proptest! {
        #[test]
        fn test_round_trip_preserves_amounts_exactly(
            payment_qty in POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO,
            forward_qty in POSITIVE | NEGATIVE | NORMAL | SUBNORMAL,
            strike in POSITIVE | NORMAL | SUBNORMAL,
        ) {
            let trades: Vec<Trade> = vec![
                TradePayment::new(Currency::USD, payment_qty, d(2020, 2, 1)).unwrap().into(),
                TradeFxForward::new(Currency::EUR, Currency::USD, forward_qty, strike, d(2018, 8, 1), d(2018, 8, 3))
                    .unwrap()
                    .into(),
            ];

            let loaded = round_trip(&trades);
            match (&loaded[0], &loaded[1]) {
                (Trade::Payment(p), Trade::FxForward(f)) => {
                    prop_assert_eq!(p.quantity().to_bits(), payment_qty.to_bits());
                    prop_assert_eq!(f.quantity().to_bits(), forward_qty.to_bits());
                    prop_assert_eq!(f.strike().to_bits(), strike.to_bits());
                }
                other => prop_assert!(false, "unexpected trades {:?}", other),
            }
            prop_assert_eq!(loaded, trades);
        }
    }
}
