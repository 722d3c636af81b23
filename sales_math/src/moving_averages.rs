//! Moving average calculations
//!
//! Contains implementations of the two averages used as forecast bases:
//! - Simple Moving Average (SMA)
//! - Linearly Weighted Moving Average (WMA)
//!
//! Both operate on the trailing `window` values of a series. A series shorter
//! than the window is averaged over whatever is available, and an empty series
//! averages to zero.

use crate::{ensure_finite, MathError, Result};

fn trailing(values: &[f64], window: usize) -> Result<&[f64]> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }
    ensure_finite(values)?;

    let start = values.len().saturating_sub(window);
    Ok(&values[start..])
}

/// Mean of the last `window` values.
///
/// # Errors
/// Returns [`MathError::InvalidInput`] when `window` is zero or the series
/// contains a non-finite value.
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<f64> {
    let recent = trailing(values, window)?;
    if recent.is_empty() {
        return Ok(0.0);
    }

    Ok(recent.iter().sum::<f64>() / recent.len() as f64)
}

/// Mean of the last `window` values weighted 1, 2, ..., n from oldest to
/// most recent.
///
/// # Errors
/// Returns [`MathError::InvalidInput`] when `window` is zero or the series
/// contains a non-finite value.
pub fn weighted_moving_average(values: &[f64], window: usize) -> Result<f64> {
    let recent = trailing(values, window)?;
    if recent.is_empty() {
        return Ok(0.0);
    }

    let (weighted_sum, weight_total) = recent
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, total), (i, &value)| {
            let weight = (i + 1) as f64;
            (sum + value * weight, total + weight)
        });

    Ok(weighted_sum / weight_total)
}
