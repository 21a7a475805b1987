//! Integration tests for the market cache driven from flat files.

use std::io::Write;
use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::{
    Curve, ErrorKind, FixingDataServer, LoadError, Market, RiskFactorStore,
};
use pricer_core::types::{Currency, Date};

const RISK_FACTORS: &str = "\
IR.30D.USD 0.01
IR.360D.USD 0.02
IR.1W.EUR 0.001
IR.1Y.EUR 0.002
IR.5Y.EUR 0.004
FX.SPOT.EUR 1.10
FX.SPOT.GBP 1.30
";

fn today() -> Date {
    Date::from_ymd(2017, 8, 5).unwrap()
}

fn market_from_file() -> Market {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RISK_FACTORS.as_bytes()).unwrap();
    let store = RiskFactorStore::from_file(file.path()).unwrap();
    Market::new(Arc::new(store), today())
}

// ========================================
// Curves from file
// ========================================

#[test]
fn test_discount_factor_example() {
    let mut market = market_from_file();
    let curve = market.get_discount_curve("IR.DISCOUNT.USD").unwrap();

    assert_eq!(curve.df(today()).unwrap(), 1.0);
    let local = (0.02 * 360.0 - 0.01 * 30.0) / 330.0;
    assert_relative_eq!(local, 0.0209091, epsilon = 1e-7);
    assert_relative_eq!(curve.df(today().add_days(200)).unwrap(), 0.98950, epsilon = 1e-5);
}

#[test]
fn test_triangulated_spot() {
    let mut market = market_from_file();
    let spot = market.get_fx_spot_curve("FX.SPOT.EUR.GBP").unwrap();
    assert_relative_eq!(spot.spot(), 0.84615, epsilon = 1e-5);
    assert_eq!(
        spot.dependencies().iter().collect::<Vec<_>>(),
        vec!["FX.SPOT.EUR", "FX.SPOT.GBP"]
    );
}

#[test]
fn test_forward_parity() {
    let mut market = market_from_file();
    let fwd = market.get_fx_forward_curve("FX.FWD.EUR.USD").unwrap();
    let t = today().add_days(360);

    let b_eur = market.discount_curve(Currency::EUR).unwrap().df(t).unwrap();
    let b_usd = market.discount_curve(Currency::USD).unwrap().df(t).unwrap();
    assert_relative_eq!(fwd.fwd(t).unwrap(), 1.10 * b_eur / b_usd, epsilon = 1e-14);
}

// ========================================
// Bump / restore / disconnect
// ========================================

#[test]
fn test_round_trip_byte_identical() {
    let mut market = market_from_file();
    let names: Vec<String> = market.store().iter().map(|(n, _)| n.to_string()).collect();
    for name in &names {
        market.get_value(name).unwrap();
    }
    market.get_fx_forward_curve("FX.FWD.EUR.USD").unwrap();
    let before = market.match_risk_factors(".*").unwrap();

    let bump: Vec<(String, f64)> = market
        .match_risk_factors(r"IR\.[0-9]+[DWMY]\.EUR")
        .unwrap()
        .into_iter()
        .map(|(n, v)| (n, v + 0.0001))
        .collect();
    let original = market.match_risk_factors(r"IR\.[0-9]+[DWMY]\.EUR").unwrap();

    market.set_risk_factors(&bump).unwrap();
    market.get_fx_forward_curve("FX.FWD.EUR.USD").unwrap();
    market.set_risk_factors(&original).unwrap();

    let after = market.match_risk_factors(".*").unwrap();
    assert_eq!(format!("{:?}", before), format!("{:?}", after));
    assert!(before
        .iter()
        .zip(&after)
        .all(|((n1, v1), (n2, v2))| n1 == n2 && v1.to_bits() == v2.to_bits()));
}

#[test]
fn test_disconnected_market() {
    let mut market = market_from_file();
    let usd = market.get_discount_curve("IR.DISCOUNT.USD").unwrap();
    market.disconnect();

    assert!(market
        .get_discount_curve("IR.DISCOUNT.USD")
        .unwrap()
        .df(today().add_days(100))
        .is_ok());
    assert!(usd.df(today().add_days(100)).is_ok());

    let err = market.get_discount_curve("IR.DISCOUNT.EUR").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MarketDisconnected);
    let err = market.get_fx_spot_curve("FX.SPOT.GBP").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MarketDisconnected);
}

// ========================================
// Loaders
// ========================================

#[test]
fn test_duplicate_risk_factor_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "IR.1Y.USD 0.02").unwrap();
    writeln!(file, "IR.1Y.USD 0.03").unwrap();
    assert!(matches!(
        RiskFactorStore::from_file(file.path()),
        Err(LoadError::Duplicate { line: 2, .. })
    ));
}

#[test]
fn test_fixing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "FX.SPOT.EUR.USD 20170804 1.1772").unwrap();
    writeln!(file, "FX.SPOT.EUR.USD 20170805 1.1801").unwrap();

    let fixings = FixingDataServer::from_file(file.path()).unwrap();
    assert_eq!(fixings.get("FX.SPOT.EUR.USD", today()).unwrap(), 1.1801);
    assert_eq!(fixings.lookup("FX.SPOT.GBP.USD", today()), None);
}
