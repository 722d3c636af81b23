//! Volatility of a revenue series
//!
//! Volatility is the sample standard deviation (n - 1 denominator). It sizes
//! the confidence interval around each forecast.

use statrs::statistics::Statistics;

/// Sample standard deviation of `values`; zero for fewer than two values.
pub fn volatility(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    values.iter().std_dev()
}

/// Half-width of a 95% interval after `steps` periods, widening with the
/// square root of the distance.
pub fn interval_margin(volatility: f64, steps: u32) -> f64 {
    1.96 * volatility * f64::from(steps).sqrt()
}
