//! Bump sizes for the sensitivity engine.

use crate::error::RiskError;

/// Absolute interest-rate bump: one basis point.
pub const DEFAULT_IR_BUMP_SIZE: f64 = 0.0001;

/// Relative FX spot bump: 0.1% of the spot.
pub const DEFAULT_FX_RELATIVE_BUMP: f64 = 0.001;

/// Configuration for [`SensitivityEngine`](super::SensitivityEngine).
///
/// # Examples
///
/// ```
/// use pricer_risk::sensitivities::SensitivityConfig;
///
/// let config = SensitivityConfig::new().with_ir_bump_size(0.0005);
/// assert_eq!(config.ir_bump_size, 0.0005);
/// assert_eq!(config.fx_relative_bump, 0.001);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivityConfig {
    /// Absolute bump applied to zero rates, in both directions.
    pub ir_bump_size: f64,

    /// Relative bump applied to FX spots, in both directions.
    pub fx_relative_bump: f64,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            ir_bump_size: DEFAULT_IR_BUMP_SIZE,
            fx_relative_bump: DEFAULT_FX_RELATIVE_BUMP,
        }
    }
}

impl SensitivityConfig {
    /// Creates a configuration with the default bumps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute interest-rate bump.
    pub fn with_ir_bump_size(mut self, bump: f64) -> Self {
        self.ir_bump_size = bump;
        self
    }

    /// Sets the relative FX spot bump.
    pub fn with_fx_relative_bump(mut self, bump: f64) -> Self {
        self.fx_relative_bump = bump;
        self
    }

    /// Checks that both bumps are positive and finite.
    pub fn validate(&self) -> Result<(), RiskError> {
        check_bump("ir_bump_size", self.ir_bump_size)?;
        check_bump("fx_relative_bump", self.fx_relative_bump)
    }
}

fn check_bump(name: &'static str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RiskError::InvalidBumpSize { name, value })
    }
}
