use serde::{Deserialize, Serialize};

use common::{Error, PortfolioResult, Result};

/// Indicator periods and starting balance for the simulator.
///
/// Example `[simulator]` section of `config/optimizer.toml`:
/// ```toml
/// [simulator]
/// rsi_period = 14
/// cv_period = 10
/// initial_investment = 1000.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub rsi_period: usize,
    pub cv_period: usize,
    /// Balance the compounded return is measured against.
    pub initial_investment: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            cv_period: 10,
            initial_investment: PortfolioResult::DEFAULT_INITIAL_INVESTMENT,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rsi_period < 2 {
            return Err(Error::InvalidConfig(format!(
                "rsi_period must be >= 2, got {}",
                self.rsi_period
            )));
        }
        if self.cv_period < 1 {
            return Err(Error::InvalidConfig("cv_period must be >= 1".into()));
        }
        if !(self.initial_investment.is_finite() && self.initial_investment > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "initial_investment must be positive, got {}",
                self.initial_investment
            )));
        }
        Ok(())
    }
}
