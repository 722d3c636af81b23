//! Metrics for evaluating forecast performance

use serde::{Deserialize, Serialize};
use std::fmt;

/// `|predicted - actual| / actual`, or `None` when there is no positive
/// actual to compare against.
pub fn absolute_percentage_error(predicted: f64, actual: f64) -> Option<f64> {
    if actual > 0.0 && actual.is_finite() && predicted.is_finite() {
        Some((predicted - actual).abs() / actual)
    } else {
        None
    }
}

/// Mean absolute percentage error in percent, with the number of samples
/// that contributed. Pairs without a positive actual are skipped; `None` when none remain.
pub fn mean_absolute_percentage_error<I>(pairs: I) -> Option<(f64, usize)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let errors: Vec<f64> = pairs
        .into_iter()
        .filter_map(|(predicted, actual)| absolute_percentage_error(predicted, actual))
        .collect();
    if errors.is_empty() {
        return None;
    }

    let mape = errors.iter().sum::<f64>() / errors.len() as f64 * 100.0;
    Some((mape, errors.len()))
}

/// Qualitative reading of a MAPE value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyRating {
    VeryAccurate,
    Accurate,
    FairlyAccurate,
    NeedsImprovement,
    Poor,
}

impl AccuracyRating {
    /// Bands are exclusive upper bounds checked in ascending order.
    pub fn from_mape(mape: f64) -> Self {
        match mape {
            m if m < 10.0 => AccuracyRating::VeryAccurate,
            m if m < 20.0 => AccuracyRating::Accurate,
            m if m < 30.0 => AccuracyRating::FairlyAccurate,
            m if m < 50.0 => AccuracyRating::NeedsImprovement,
            _ => AccuracyRating::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccuracyRating::VeryAccurate => "very accurate",
            AccuracyRating::Accurate => "accurate",
            AccuracyRating::FairlyAccurate => "fairly accurate",
            AccuracyRating::NeedsImprovement => "needs improvement",
            AccuracyRating::Poor => "poor — revisit model",
        }
    }
}

impl fmt::Display for AccuracyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
