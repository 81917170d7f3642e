use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use common::{Error, Result};
use strategy::SimulatorConfig;

use crate::bounds::ParameterBounds;

/// Search hyperparameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Evaluations per climb, the random start included.
    pub max_iterations_per_climb: usize,
    /// Neighbor distance along the perturbed dimension.
    pub step_size: f64,
    /// Candidates with fewer trades are never accepted.
    pub min_trade_count: usize,
    /// Wall-clock budget. Checked between climbs only, so a run may overrun
    /// it by up to one climb.
    pub time_budget_ms: u64,
    /// Minimum spacing between intermediate progress updates.
    pub progress_interval_ms: u64,
    /// Pause after each climb that lets other tasks on the runtime run.
    pub yield_delay_ms: u64,
    pub bounds: ParameterBounds,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations_per_climb: 300,
            step_size: 5.0,
            min_trade_count: 3,
            time_budget_ms: 5_000,
            progress_interval_ms: 200,
            yield_delay_ms: 20,
            bounds: ParameterBounds::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn yield_delay(&self) -> Duration {
        Duration::from_millis(self.yield_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations_per_climb == 0 {
            return Err(Error::InvalidConfig("max_iterations_per_climb must be >= 1".into()));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        self.bounds.validate()
    }
}

/// Top-level config file (TOML). Every section and key is optional.
///
/// Example `config/optimizer.toml`:
/// ```toml
/// [simulator]
/// rsi_period = 14
/// cv_period = 10
///
/// [optimizer]
/// time_budget_ms = 5000
/// min_trade_count = 3
///
/// [optimizer.bounds]
/// buy_rsi = [0.0, 100.0]
/// sell_cv = [0.0, 400.0]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerFileConfig {
    pub simulator: SimulatorConfig,
    pub optimizer: OptimizerConfig,
}

impl OptimizerFileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content)?;
        cfg.simulator.validate()?;
        cfg.optimizer.validate()?;
        Ok(cfg)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded optimizer config");
        Ok(cfg)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "No optimizer config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = OptimizerFileConfig::from_toml("").unwrap();
        assert_eq!(cfg, OptimizerFileConfig::default());
        assert_eq!(cfg.optimizer.max_iterations_per_climb, 300);
        assert_eq!(cfg.optimizer.time_budget(), Duration::from_secs(5));
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = OptimizerFileConfig::from_toml(
            r#"
            [simulator]
            rsi_period = 7

            [optimizer]
            step_size = 2.5

            [optimizer.bounds]
            buy_cv = [-30.0, -5.0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.simulator.rsi_period, 7);
        assert_eq!(cfg.simulator.cv_period, 10);
        assert_eq!(cfg.optimizer.step_size, 2.5);
        assert_eq!(cfg.optimizer.min_trade_count, 3);
        assert_eq!(cfg.optimizer.bounds.buy_cv.low, -30.0);
        assert_eq!(cfg.optimizer.bounds.buy_rsi.high, 100.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(OptimizerFileConfig::from_toml("[optimizer]\nstep_size = 0.0").is_err());
        assert!(OptimizerFileConfig::from_toml("[optimizer.bounds]\nbuy_rsi = [90.0, 10.0]").is_err());
        assert!(OptimizerFileConfig::from_toml("[simulator]\nrsi_period = 1").is_err());
        assert!(matches!(
            OptimizerFileConfig::from_toml("[optimizer]\nstep_size = \"big\""),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = OptimizerFileConfig::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(cfg, OptimizerFileConfig::default());
    }
}
