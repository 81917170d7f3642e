use std::path::PathBuf;

use crate::{Error, Result};

/// Host configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the candle array to optimize against.
    pub candles_path: PathBuf,

    /// TOML file with simulator and optimizer settings. Missing file = defaults.
    pub optimizer_config_path: PathBuf,

    // Overrides applied on top of the file config
    pub time_budget_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Ok(Config {
            candles_path: required_env("CANDLES_PATH")?.into(),
            optimizer_config_path: optional_env("OPTIMIZER_CONFIG_PATH")
                .unwrap_or_else(|| "config/optimizer.toml".to_string())
                .into(),
            time_budget_ms: parsed_env("OPTIMIZER_TIME_BUDGET_MS")?,
            seed: parsed_env("OPTIMIZER_SEED")?,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        Error::InvalidConfig(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parsed_env(key: &str) -> Result<Option<u64>> {
    optional_env(key)
        .map(|v| {
            v.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("{key} must be a non-negative integer, got: '{v}'"))
            })
        })
        .transpose()
}
