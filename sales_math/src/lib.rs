//! # Sales Math
//!
//! Statistical estimators used by the sales forecasting engine.
//! Every function here is a pure computation over an ordered series of
//! values: nothing reads a clock, touches storage, or keeps state between
//! calls.
//!
//! - [`trend`]: ordinary least squares trend over index positions
//! - [`seasonality`]: day-of-week revenue factors
//! - [`moving_averages`]: simple and linearly weighted moving averages
//! - [`volatility`]: sample standard deviation
//! - [`confidence`]: heuristic confidence score and rounding helpers

use thiserror::Error;

pub mod confidence;
pub mod moving_averages;
pub mod seasonality;
pub mod trend;
pub mod volatility;

pub use confidence::{confidence_score, round_to};
pub use moving_averages::{simple_moving_average, weighted_moving_average};
pub use seasonality::{weekly_seasonality, WeeklySeasonality};
pub use trend::{linear_trend, LinearTrend};
pub use volatility::{interval_margin, volatility};

/// Errors that can occur in estimator calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for estimator operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject series containing NaN or infinite values.
pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(MathError::InvalidInput(format!(
            "Non-finite value {} at position {}",
            values[idx], idx
        ))),
        None => Ok(()),
    }
}
