//! Accuracy of past forecasts against realized revenue

use crate::calendar::{shift_days, Clock};
use crate::data::PeriodType;
use crate::error::{ForecastError, Result};
use crate::metrics::{mean_absolute_percentage_error, AccuracyRating};
use crate::source::HistoricalDataSource;
use crate::store::{ForecastQuery, ForecastStore};
use log::{debug, info, warn};
use sales_math::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_FORECASTS_MESSAGE: &str = "no forecasts to evaluate";
pub const NO_ACTUALS_MESSAGE: &str = "no actual data to compare";

/// Outcome of an accuracy evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Mean absolute percentage error, in percent
    pub mape: Option<f64>,
    /// `100 - mape`
    pub accuracy: Option<f64>,
    /// Forecasts that had a usable actual
    pub sample_count: usize,
    pub rating: Option<AccuracyRating>,
    /// Why nothing was evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AccuracyReport {
    /// Informational report carrying no measurement.
    pub fn nothing_to_evaluate(message: &str) -> Self {
        Self {
            mape: None,
            accuracy: None,
            sample_count: 0,
            rating: None,
            message: Some(message.to_string()),
        }
    }

    /// Report for a raw MAPE percentage over `sample_count` samples.
    pub fn from_mape(mape: f64, sample_count: usize) -> Self {
        Self {
            mape: Some(round_to(mape, 2)),
            accuracy: Some(round_to(100.0 - mape, 2)),
            sample_count,
            rating: Some(AccuracyRating::from_mape(mape)),
            message: None,
        }
    }

    pub fn has_measurement(&self) -> bool {
        self.mape.is_some()
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mape, self.accuracy, self.rating) {
            (Some(mape), Some(accuracy), Some(rating)) => {
                writeln!(f, "Forecast Accuracy:")?;
                writeln!(f, "  MAPE:     {:.2}%", mape)?;
                writeln!(f, "  Accuracy: {:.2}%", accuracy)?;
                writeln!(f, "  Samples:  {}", self.sample_count)?;
                writeln!(f, "  Rating:   {}", rating)
            }
            _ => writeln!(f, "{}", self.message.as_deref().unwrap_or(NO_FORECASTS_MESSAGE)),
        }
    }
}

/// Compares stored forecasts with realized revenue
pub struct AccuracyEvaluator<'a> {
    source: &'a dyn HistoricalDataSource,
    store: &'a dyn ForecastStore,
    clock: &'a dyn Clock,
}

impl<'a> AccuracyEvaluator<'a> {
    pub fn new(
        source: &'a dyn HistoricalDataSource,
        store: &'a dyn ForecastStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            source,
            store,
            clock,
        }
    }

    /// Evaluate `period_type` forecasts dated in `[today - days_back, today)`.
    ///
    /// Missing forecasts or actuals yield an informational report, not an
    /// error. Lookup failures in the store or source do propagate.
    pub fn evaluate(&self, period_type: PeriodType, days_back: u32) -> Result<AccuracyReport> {
        if days_back == 0 {
            return Err(ForecastError::InvalidParameter(
                "days_back must be at least 1".to_string(),
            ));
        }

        let today = self.clock.today();
        let from = shift_days(today, -i64::from(days_back))?;
        let query = ForecastQuery::new().period(period_type).since(from).until(today);
        let forecasts = self.store.query(&query)?;
        info!(
            "Evaluating {} {} forecasts between {} and {}",
            forecasts.len(),
            period_type,
            from,
            today
        );

        if forecasts.is_empty() {
            return Ok(AccuracyReport::nothing_to_evaluate(NO_FORECASTS_MESSAGE));
        }

        let mut pairs = Vec::with_capacity(forecasts.len());
        for forecast in &forecasts {
            let actual = self.source.actual_revenue(forecast.forecast_date)?;
            debug!(
                "{}: predicted {:.2}, actual {:.2}",
                forecast.forecast_date, forecast.predicted_revenue, actual
            );
            pairs.push((forecast.predicted_revenue, actual));
        }

        let total = forecasts.len();
        match mean_absolute_percentage_error(pairs) {
            Some((mape, samples)) => {
                if samples < total {
                    warn!(
                        "{} of {} {} forecasts had no actual revenue",
                        total - samples,
                        total,
                        period_type
                    );
                }
                let report = AccuracyReport::from_mape(mape, samples);
                info!(
                    "{} MAPE {:.2}% over {} samples ({})",
                    period_type, mape, samples, AccuracyRating::from_mape(mape)
                );
                Ok(report)
            }
            None => {
                warn!(
                    "{} of {} {} forecasts had no actual revenue",
                    total, total, period_type
                );
                Ok(AccuracyReport::nothing_to_evaluate(NO_ACTUALS_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rounding() {
        let report = AccuracyReport::from_mape(12.3456, 4);
        assert_eq!(report.mape, Some(12.35));
        assert_eq!(report.accuracy, Some(87.65));
        assert_eq!(report.rating, Some(AccuracyRating::Accurate));
        assert!(report.has_measurement());
    }

    #[test]
    fn test_report_display() {
        let text = AccuracyReport::from_mape(5.0, 2).to_string();
        assert!(text.contains("MAPE:     5.00%"));
        assert!(text.contains("very accurate"));

        let text = AccuracyReport::nothing_to_evaluate(NO_ACTUALS_MESSAGE).to_string();
        assert!(text.contains(NO_ACTUALS_MESSAGE));
    }
}
