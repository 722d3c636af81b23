//! Forecast persistence
//!
//! Forecasts are keyed by `(forecast_date, period_type)`. Writing a forecast
//! whose key already exists overwrites the previous record.

use crate::calendar::shift_days;
use crate::data::{Forecast, ForecastKey, PeriodType};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Filter for stored forecasts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastQuery {
    pub period_type: Option<PeriodType>,
    /// Inclusive lower bound on `forecast_date`
    pub from: Option<NaiveDate>,
    /// Exclusive upper bound on `forecast_date`
    pub until: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl ForecastQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(mut self, period_type: PeriodType) -> Self {
        self.period_type = Some(period_type);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Inclusive upper bound.
    pub fn through(mut self, date: NaiveDate) -> Result<Self> {
        self.until = Some(shift_days(date, 1)?);
        Ok(self)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Forecasts of `period_type` dated from `today` through `today + days`.
    pub fn upcoming(period_type: PeriodType, today: NaiveDate, days: u32) -> Result<Self> {
        Self::new()
            .period(period_type)
            .since(today)
            .through(shift_days(today, i64::from(days))?)
    }

    pub fn matches(&self, forecast: &Forecast) -> bool {
        self.period_type.map_or(true, |p| p == forecast.period_type)
            && self.from.map_or(true, |d| forecast.forecast_date >= d)
            && self.until.map_or(true, |d| forecast.forecast_date < d)
    }
}

/// Keyed forecast storage
pub trait ForecastStore {
    /// Insert `forecast`, or overwrite the stored forecast with the same key.
    fn upsert(&self, forecast: Forecast) -> Result<Forecast>;

    /// Forecasts matching `query`, ascending by `forecast_date`.
    fn query(&self, query: &ForecastQuery) -> Result<Vec<Forecast>>;
}

/// Thread-safe in-memory forecast store
#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    records: RwLock<BTreeMap<ForecastKey, Forecast>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a single record by key.
    pub fn get(
        &self,
        forecast_date: NaiveDate,
        period_type: PeriodType,
    ) -> Result<Option<Forecast>> {
        let records = self
            .records
            .read()
            .map_err(|e| ForecastError::Persistence(format!("Store lock poisoned: {}", e)))?;
        Ok(records.get(&(forecast_date, period_type)).cloned())
    }
}

impl ForecastStore for InMemoryForecastStore {
    fn upsert(&self, forecast: Forecast) -> Result<Forecast> {
        let mut records = self
            .records
            .write()
            .map_err(|e| ForecastError::Persistence(format!("Store lock poisoned: {}", e)))?;
        records.insert(forecast.key(), forecast.clone());
        Ok(forecast)
    }

    fn query(&self, query: &ForecastQuery) -> Result<Vec<Forecast>> {
        let records = self
            .records
            .read()
            .map_err(|e| ForecastError::Persistence(format!("Store lock poisoned: {}", e)))?;
        // Keys sort by date first, so iteration order is already ascending.
        Ok(records
            .values()
            .filter(|f| query.matches(f))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
