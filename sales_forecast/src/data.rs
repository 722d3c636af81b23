//! Sales data model: historical aggregates in, forecast records out

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Forecast granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
}

impl PeriodType {
    /// Every granularity, in the order `generate_all` runs them
    pub const ALL: [PeriodType; 3] = [PeriodType::Daily, PeriodType::Weekly, PeriodType::Monthly];

    /// Lowercase name used in storage keys and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Daily => "daily",
            PeriodType::Weekly => "weekly",
            PeriodType::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PeriodType::Daily),
            "weekly" => Ok(PeriodType::Weekly),
            "monthly" => Ok(PeriodType::Monthly),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unsupported period type: {}",
                other
            ))),
        }
    }
}

/// Aggregated completed sales for one day, ISO week, or month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// First date of the period
    pub period_start: NaiveDate,
    /// Sum of completed order totals
    pub revenue: f64,
    /// Number of completed orders
    pub transaction_count: u64,
}

impl HistoricalPoint {
    pub fn new(period_start: NaiveDate, revenue: f64, transaction_count: u64) -> Self {
        Self {
            period_start,
            revenue,
            transaction_count,
        }
    }
}

/// Check that a series is chronological, has no duplicate period keys and
/// carries finite, non-negative revenue.
pub fn validate_series(points: &[HistoricalPoint]) -> Result<()> {
    for (i, point) in points.iter().enumerate() {
        if !point.revenue.is_finite() || point.revenue < 0.0 {
            return Err(ForecastError::DataSource(format!(
                "Invalid revenue {} for period starting {}",
                point.revenue, point.period_start
            )));
        }
        if i > 0 && points[i - 1].period_start >= point.period_start {
            return Err(ForecastError::DataSource(format!(
                "Series is not strictly chronological at {} (previous {})",
                point.period_start,
                points[i - 1].period_start
            )));
        }
    }
    Ok(())
}

/// Revenue column of a series
pub fn revenues(points: &[HistoricalPoint]) -> Vec<f64> {
    points.iter().map(|p| p.revenue).collect()
}

/// Transaction count column of a series
pub fn transaction_counts(points: &[HistoricalPoint]) -> Vec<f64> {
    points.iter().map(|p| p.transaction_count as f64).collect()
}

/// Estimation method behind a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Weighted moving average with trend and weekday seasonality
    WeightedMaWithSeasonality,
    /// Weighted moving average with trend over ISO weeks
    WeightedMaWeekly,
    /// Simple moving average with trend over months
    SmaMonthly,
}

impl ForecastMethod {
    pub fn for_period(period_type: PeriodType) -> Self {
        match period_type {
            PeriodType::Daily => ForecastMethod::WeightedMaWithSeasonality,
            PeriodType::Weekly => ForecastMethod::WeightedMaWeekly,
            PeriodType::Monthly => ForecastMethod::SmaMonthly,
        }
    }
}

/// Diagnostics recorded alongside each forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetadata {
    pub method: ForecastMethod,
    pub trend_slope: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_revenue: Option<f64>,
}

impl ForecastMetadata {
    /// JSON object form, as stored in a metadata column.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| ForecastError::Persistence(format!("Failed to encode metadata: {}", e)))
    }
}

/// Unique key of a stored forecast
pub type ForecastKey = (NaiveDate, PeriodType);

/// A point forecast with its confidence interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecast_date: NaiveDate,
    pub period_type: PeriodType,
    pub predicted_revenue: f64,
    pub predicted_transactions: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub confidence_score: f64,
    pub metadata: ForecastMetadata,
}

impl Forecast {
    /// Storage key: one record per date and granularity
    pub fn key(&self) -> ForecastKey {
        (self.forecast_date, self.period_type)
    }
}
