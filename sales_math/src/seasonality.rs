//! Day-of-week seasonality
//!
//! Each weekday's factor is that weekday's mean revenue divided by the
//! overall mean revenue. A factor above 1.0 marks a stronger than average
//! day. Weekdays never observed keep a neutral factor of 1.0.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Revenue multipliers indexed by days from Sunday (0 = Sunday, 6 = Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklySeasonality {
    factors: [f64; 7],
}

impl Default for WeeklySeasonality {
    fn default() -> Self {
        Self { factors: [1.0; 7] }
    }
}

impl WeeklySeasonality {
    /// Factor for the given weekday.
    pub fn factor(&self, weekday: Weekday) -> f64 {
        self.factors[weekday.num_days_from_sunday() as usize]
    }

    /// All seven factors, Sunday first.
    pub fn factors(&self) -> &[f64; 7] {
        &self.factors
    }

    /// True when no weekday deviates from the overall mean.
    pub fn is_neutral(&self) -> bool {
        self.factors.iter().all(|&f| f == 1.0)
    }
}

/// Compute weekday factors from `(weekday, revenue)` observations.
pub fn weekly_seasonality<I>(observations: I) -> WeeklySeasonality
where
    I: IntoIterator<Item = (Weekday, f64)>,
{
    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    let mut total = 0.0;
    let mut n = 0_usize;

    for (weekday, revenue) in observations {
        let idx = weekday.num_days_from_sunday() as usize;
        sums[idx] += revenue;
        counts[idx] += 1;
        total += revenue;
        n += 1;
    }

    let overall_mean = if n > 0 { total / n as f64 } else { 0.0 };
    if overall_mean <= 0.0 {
        return WeeklySeasonality::default();
    }

    let mut factors = [1.0; 7];
    for (idx, factor) in factors.iter_mut().enumerate() {
        if counts[idx] > 0 {
            *factor = (sums[idx] / counts[idx] as f64) / overall_mean;
        }
    }

    WeeklySeasonality { factors }
}
