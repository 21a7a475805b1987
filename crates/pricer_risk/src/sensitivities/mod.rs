//! Finite-difference sensitivities by bump and revalue.
//!
//! Every calculation follows the same scaffold against a private clone of
//! the base market: bump down, price, bump up, price, restore the original
//! values, then take the central difference per trade.
//!
//! | Calculation                               | Bump set                         | Key            |
//! |-------------------------------------------|----------------------------------|----------------|
//! | [`SensitivityEngine::pv01_parallel`]      | all tenors of one currency       | currency code  |
//! | [`SensitivityEngine::pv01_bucketed`]      | one tenor                        | risk factor    |
//! | [`SensitivityEngine::fx_delta`]           | one USD-quoted spot, relative    | risk factor    |

mod config;
mod engine;

pub use config::{SensitivityConfig, DEFAULT_FX_RELATIVE_BUMP, DEFAULT_IR_BUMP_SIZE};
pub use engine::{Sensitivity, SensitivityEngine};
