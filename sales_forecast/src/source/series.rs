//! Pre-aggregated in-memory data source

use super::HistoricalDataSource;
use crate::data::{validate_series, HistoricalPoint, PeriodType};
use crate::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Data source backed by series that were aggregated elsewhere
#[derive(Debug, Clone, Default)]
pub struct SeriesSource {
    daily: Vec<HistoricalPoint>,
    weekly: Vec<HistoricalPoint>,
    monthly: Vec<HistoricalPoint>,
    actuals: HashMap<NaiveDate, f64>,
}

impl SeriesSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series for `period_type`, rejecting malformed input.
    pub fn with_series(
        mut self,
        period_type: PeriodType,
        points: Vec<HistoricalPoint>,
    ) -> Result<Self> {
        validate_series(&points)?;
        match period_type {
            PeriodType::Daily => self.daily = points,
            PeriodType::Weekly => self.weekly = points,
            PeriodType::Monthly => self.monthly = points,
        }
        Ok(self)
    }

    /// Record the realized revenue for a date.
    pub fn with_actual(mut self, date: NaiveDate, revenue: f64) -> Self {
        self.actuals.insert(date, revenue);
        self
    }

    fn since(points: &[HistoricalPoint], since: NaiveDate) -> Vec<HistoricalPoint> {
        points
            .iter()
            .filter(|p| p.period_start >= since)
            .copied()
            .collect()
    }
}

impl HistoricalDataSource for SeriesSource {
    fn query_daily(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        Ok(Self::since(&self.daily, since))
    }

    fn query_weekly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        Ok(Self::since(&self.weekly, since))
    }

    fn query_monthly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        Ok(Self::since(&self.monthly, since))
    }

    fn actual_revenue(&self, date: NaiveDate) -> Result<f64> {
        Ok(self.actuals.get(&date).copied().unwrap_or(0.0))
    }
}
