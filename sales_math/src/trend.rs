//! Linear trend estimation
//!
//! Fits `y = slope * x + intercept` by ordinary least squares, where `x` is
//! the position of each value in the series (0, 1, ..., n-1).

use serde::{Deserialize, Serialize};

/// Fitted least squares line over index positions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearTrend {
    /// Change per step
    pub slope: f64,
    /// Value at position zero
    pub intercept: f64,
}

/// Fit a linear trend to `values` against their index positions.
///
/// Never fails. A series of fewer than two values has no slope: the
/// intercept is the single value (or zero for an empty series).
pub fn linear_trend(values: &[f64]) -> LinearTrend {
    let n = values.len();
    if n < 2 {
        return LinearTrend {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
        };
    }

    let n_f = n as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = values.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        },
    );

    let denominator = n_f * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return LinearTrend {
            slope: 0.0,
            intercept: sum_y / n_f,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;

    LinearTrend { slope, intercept }
}
