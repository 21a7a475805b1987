//! Create-portfolio command implementation
//!
//! Writes the demo portfolio used by the risk examples.

use std::path::Path;

use pricer_core::types::{Currency, Date};
use pricer_models::trades::{save_portfolio, Portfolio, TradeFxForward, TradePayment};
use tracing::info;

use crate::Result;

/// Two payments and one EUR/USD forward.
pub fn demo_portfolio() -> Result<Portfolio> {
    let date = |y, m, d| Date::from_ymd(y, m, d);
    let portfolio = vec![
        TradePayment::new(Currency::USD, 10.0, date(2020, 2, 1)?)?.into(),
        TradePayment::new(Currency::EUR, 20.0, date(2020, 2, 2)?)?.into(),
        TradeFxForward::new(
            Currency::EUR,
            Currency::USD,
            1_000_000.0,
            1.18,
            date(2018, 8, 1)?,
            date(2018, 8, 3)?,
        )?
        .into(),
    ];
    Ok(portfolio)
}

/// Run the create-portfolio command
pub fn run(output: &Path) -> Result<()> {
    let portfolio = demo_portfolio()?;
    save_portfolio(output, &portfolio)?;
    info!(path = %output.display(), trades = portfolio.len(), "Portfolio written");
    Ok(())
}
