//! Reporting helpers over stored forecasts

use crate::data::{Forecast, HistoricalPoint};
use chrono::NaiveDate;
use sales_math::round_to;
use serde::{Deserialize, Serialize};

/// Forecast-versus-history shift that counts as a trend, in percent
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Totals over a run of forecasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_predicted_revenue: f64,
    pub average_predicted_revenue: Option<f64>,
    pub total_predicted_transactions: f64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ForecastSummary {
    /// Summarize forecasts given in date order.
    pub fn from_forecasts(forecasts: &[Forecast]) -> Self {
        let total_predicted_revenue: f64 = forecasts.iter().map(|f| f.predicted_revenue).sum();
        let average_predicted_revenue = if forecasts.is_empty() {
            None
        } else {
            Some(total_predicted_revenue / forecasts.len() as f64)
        };

        Self {
            total_predicted_revenue,
            average_predicted_revenue,
            total_predicted_transactions: forecasts.iter().map(|f| f.predicted_transactions).sum(),
            start: forecasts.first().map(|f| f.forecast_date),
            end: forecasts.last().map(|f| f.forecast_date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Warning,
    Info,
}

/// A short observation for a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Compare upcoming forecasts with recent history and point out the peak.
pub fn insights(forecasts: &[Forecast], historical: &[HistoricalPoint]) -> Vec<Insight> {
    let mut found = Vec::new();
    if forecasts.is_empty() || historical.is_empty() {
        return found;
    }

    let avg_historical =
        historical.iter().map(|p| p.revenue).sum::<f64>() / historical.len() as f64;
    let avg_forecast =
        forecasts.iter().map(|f| f.predicted_revenue).sum::<f64>() / forecasts.len() as f64;

    if avg_historical > 0.0 {
        let trend = (avg_forecast - avg_historical) / avg_historical * 100.0;
        if trend > TREND_THRESHOLD_PCT {
            found.push(Insight {
                kind: InsightKind::Positive,
                message: format!(
                    "Forecast trends upward {:.1}% against the historical average",
                    trend
                ),
            });
        } else if trend < -TREND_THRESHOLD_PCT {
            found.push(Insight {
                kind: InsightKind::Warning,
                message: format!(
                    "Forecast trends downward {:.1}% against the historical average",
                    trend.abs()
                ),
            });
        }
    }

    let peak = forecasts
        .iter()
        .reduce(|a, b| if b.predicted_revenue > a.predicted_revenue { b } else { a });
    if let Some(peak) = peak {
        found.push(Insight {
            kind: InsightKind::Info,
            message: format!(
                "Highest predicted sales: {} ({:.0})",
                peak.forecast_date.format("%A, %d %B"),
                peak.predicted_revenue
            ),
        });
    }

    found
}

/// Percentage by which `actual` deviates from `predicted`, rounded to two
/// decimals. `None` when either side is zero.
pub fn revenue_variance(actual: f64, predicted: f64) -> Option<f64> {
    if actual == 0.0 || predicted == 0.0 {
        return None;
    }
    Some(round_to((actual - predicted) / predicted * 100.0, 2))
}
