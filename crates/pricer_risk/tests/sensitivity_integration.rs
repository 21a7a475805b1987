//! End-to-end sensitivities against file-backed market data.

use std::io::Write;
use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::{FixingDataServer, Market, RiskFactorStore};
use pricer_core::types::{Currency, Date};
use pricer_models::trades::{get_pricers, Portfolio, TradeFxForward, TradePayment};
use pricer_risk::{compute_prices, portfolio_total, SensitivityConfig, SensitivityEngine};
use proptest::prelude::*;

fn today() -> Date {
    Date::from_ymd(2017, 8, 5).unwrap()
}

fn flat_usd_market(rate: f64) -> Market {
    let store: RiskFactorStore = vec![("IR.10Y.USD", rate)].into_iter().collect();
    Market::new(Arc::new(store), today())
}

fn file_market() -> Market {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "IR.1W.USD 0.011\nIR.1M.USD 0.012\nIR.1Y.USD 0.015\nIR.5Y.USD 0.02\n\
         IR.1W.EUR 0.001\nIR.1M.EUR 0.0015\nIR.1Y.EUR 0.002\nIR.5Y.EUR 0.004\n\
         IR.1Y.GBP 0.005\nFX.SPOT.EUR 1.18\nFX.SPOT.GBP 1.30\n"
    )
    .unwrap();
    Market::new(
        Arc::new(RiskFactorStore::from_file(file.path()).unwrap()),
        today(),
    )
}

// ========================================
// Analytic checks
// ========================================

#[test]
fn test_parallel_pv01_matches_duration() {
    let days = 730;
    let pricers = get_pricers(
        &[TradePayment::new(Currency::USD, 1_000_000.0, today().add_days(days))
            .unwrap()
            .into()],
        Currency::USD,
    );
    let market = flat_usd_market(0.01);
    let engine = SensitivityEngine::new(&pricers, None, SensitivityConfig::default()).unwrap();

    let pv01 = engine.pv01_parallel(&market).unwrap();
    let t = days as f64 / 365.0;
    let pv = 1_000_000.0 * (-0.01 * t).exp();
    assert_eq!(pv01.len(), 1);
    assert_relative_eq!(pv01[0].values[0].value, -t * pv, max_relative = 1e-6);
}

proptest! {
    #[test]
    fn prop_parallel_pv01_duration(rate in 0.0f64..0.08, days in 1i64..3650) {
        let pricers = get_pricers(
            &[TradePayment::new(Currency::USD, 100.0, today().add_days(days)).unwrap().into()],
            Currency::USD,
        );
        let market = flat_usd_market(rate);
        let engine = SensitivityEngine::new(&pricers, None, SensitivityConfig::default()).unwrap();

        let value = engine.pv01_parallel(&market).unwrap()[0].values[0].value;
        let t = days as f64 / 365.0;
        let expected = -t * 100.0 * (-rate * t).exp();
        prop_assert!((value - expected).abs() <= 1e-5 * expected.abs().max(1.0));
    }
}

// ========================================
// Demo-style run
// ========================================

#[test]
fn test_full_run_with_fixings() {
    let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
    let portfolio: Portfolio = vec![
        TradePayment::new(Currency::USD, 10.0, d(2020, 2, 1)).unwrap().into(),
        TradePayment::new(Currency::EUR, 20.0, d(2020, 2, 2)).unwrap().into(),
        TradeFxForward::new(Currency::EUR, Currency::USD, 1000.0, 1.17, d(2017, 8, 3), d(2017, 8, 7))
            .unwrap()
            .into(),
        TradePayment::new(Currency::GBP, 5.0, d(2030, 1, 1)).unwrap().into(),
    ];
    let pricers = get_pricers(&portfolio, Currency::USD);

    let mut fixings = FixingDataServer::new();
    fixings.insert("FX.SPOT.EUR.USD", d(2017, 8, 3), 1.1820);

    let mut market = file_market();
    let prices = compute_prices(&pricers, &mut market, Some(&fixings));
    let total = portfolio_total(&prices);

    // GBP payment lies beyond the last GBP tenor
    assert_eq!(total.failures.len(), 1);
    assert_eq!(total.failures[0].0, 3);
    assert!(prices[2].is_ok());

    // Preload the whole store, then disconnect before computing risk
    let names: Vec<String> = market.store().iter().map(|(n, _)| n.to_string()).collect();
    for name in &names {
        market.get_value(name).unwrap();
    }
    market.disconnect();

    let engine = SensitivityEngine::new(&pricers, Some(&fixings), SensitivityConfig::default()).unwrap();
    let bucketed = engine.pv01_bucketed(&market).unwrap();
    let parallel = engine.pv01_parallel(&market).unwrap();
    let delta = engine.fx_delta(&market).unwrap();

    assert_eq!(bucketed.len(), 9);
    assert_eq!(
        parallel.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
        vec!["EUR", "GBP", "USD"]
    );
    assert_eq!(
        delta.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
        vec!["FX.SPOT.EUR", "FX.SPOT.GBP"]
    );

    // Fixed forward: rate sensitivity only through USD discounting, no FX delta
    let eur_parallel = &parallel[0];
    assert_eq!(eur_parallel.values[2].value, 0.0);
    assert_eq!(delta[0].values[2].value, 0.0);

    // Failing trade is NaN everywhere, with its message
    for s in bucketed.iter().chain(&parallel).chain(&delta) {
        assert!(s.values[3].value.is_nan());
        assert!(s.values[3].error.is_some());
    }
}
