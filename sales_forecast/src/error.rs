//! Error types for the sales_forecast crate

use crate::data::PeriodType;
use sales_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough history for the requested granularity
    #[error(
        "Insufficient history for {period_type} forecast: need at least {required} points, found {found}"
    )]
    InsufficientHistory {
        period_type: PeriodType,
        required: usize,
        found: usize,
    },

    /// Historical or actual data lookup failed, or returned a malformed series
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Forecast upsert or query failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading CSV records
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from an estimator
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl ForecastError {
    /// True for the expected "not enough data yet" condition.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, ForecastError::InsufficientHistory { .. })
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
