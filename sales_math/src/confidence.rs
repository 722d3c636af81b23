//! Confidence heuristics
//!
//! The confidence score is not a statistical confidence level. It blends how
//! far ahead a forecast reaches with how much history backs it.

/// Confidence in `[0, 1]` for a forecast `steps_ahead` periods out, backed by
/// `data_points` historical observations.
///
/// Distance decays 2% per step down to a floor of 0.5; history saturates at
/// 90 observations. The product is rounded to four decimals.
pub fn confidence_score(steps_ahead: u32, data_points: usize) -> f64 {
    let distance_factor = (1.0 - f64::from(steps_ahead) * 0.02).max(0.5);
    let data_factor = (data_points as f64 / 90.0).min(1.0);

    round_to(distance_factor * data_factor, 4)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}
