use thiserror::Error;

use crate::Dimension;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed candle at index {index}: {field} is {value}")]
    MalformedCandle {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid bound for {dimension}: [{low}, {high}]")]
    InvalidBound {
        dimension: Dimension,
        low: f64,
        high: f64,
    },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("No climb completed out of {attempted} attempted: {last_error}")]
    NoCompletedClimbs { attempted: u64, last_error: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
