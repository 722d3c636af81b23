//! Forecast generation settings
//!
//! Settings can be built in code or read from a TOML file:
//!
//! ```toml
//! historical_days = 120
//! forecast_days = 14
//! utc_offset_hours = 7
//! ```

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

const HISTORICAL_DAYS_RANGE: RangeInclusive<u32> = 30..=365;
const FORECAST_DAYS_RANGE: RangeInclusive<u32> = 7..=90;
const UTC_OFFSET_RANGE: RangeInclusive<i32> = -12..=14;

/// Lookback and horizon settings for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days of history used for daily and weekly forecasts
    pub historical_days: u32,
    /// Days ahead to forecast; weekly and monthly horizons derive from it
    pub forecast_days: u32,
    /// Weighted moving average window for daily forecasts
    pub moving_average_window: usize,
    /// Weighted moving average window for weekly forecasts
    pub weekly_window: usize,
    /// Months of history used for monthly forecasts
    pub monthly_lookback_months: u32,
    /// Offset from UTC that defines "today"
    pub utc_offset_hours: i32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            historical_days: 90,
            forecast_days: 30,
            moving_average_window: 7,
            weekly_window: 4,
            monthly_lookback_months: 12,
            utc_offset_hours: 7,
        }
    }
}

impl ForecastConfig {
    /// Defaults with optional lookback and horizon overrides.
    pub fn new(historical_days: Option<u32>, forecast_days: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            historical_days: historical_days.unwrap_or(defaults.historical_days),
            forecast_days: forecast_days.unwrap_or(defaults.forecast_days),
            ..defaults
        }
    }

    pub fn with_historical_days(mut self, days: u32) -> Self {
        self.historical_days = days;
        self
    }

    pub fn with_forecast_days(mut self, days: u32) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn with_moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    pub fn with_weekly_window(mut self, window: usize) -> Self {
        self.weekly_window = window;
        self
    }

    pub fn with_monthly_lookback_months(mut self, months: u32) -> Self {
        self.monthly_lookback_months = months;
        self
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Check every setting against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if !HISTORICAL_DAYS_RANGE.contains(&self.historical_days) {
            return Err(ForecastError::InvalidParameter(format!(
                "historical_days must be between {} and {}, got {}",
                HISTORICAL_DAYS_RANGE.start(),
                HISTORICAL_DAYS_RANGE.end(),
                self.historical_days
            )));
        }
        if !FORECAST_DAYS_RANGE.contains(&self.forecast_days) {
            return Err(ForecastError::InvalidParameter(format!(
                "forecast_days must be between {} and {}, got {}",
                FORECAST_DAYS_RANGE.start(),
                FORECAST_DAYS_RANGE.end(),
                self.forecast_days
            )));
        }
        if self.moving_average_window == 0 || self.weekly_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Moving average windows must be positive".to_string(),
            ));
        }
        if self.monthly_lookback_months == 0 {
            return Err(ForecastError::InvalidParameter(
                "monthly_lookback_months must be positive".to_string(),
            ));
        }
        if !UTC_OFFSET_RANGE.contains(&self.utc_offset_hours) {
            return Err(ForecastError::InvalidParameter(format!(
                "utc_offset_hours must be between {} and {}, got {}",
                UTC_OFFSET_RANGE.start(),
                UTC_OFFSET_RANGE.end(),
                self.utc_offset_hours
            )));
        }
        Ok(())
    }

    /// Parse settings from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ForecastConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ForecastError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.historical_days, 90);
        assert_eq!(config.forecast_days, 30);
        assert_eq!(config.moving_average_window, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = ForecastConfig::new(Some(120), None);
        assert_eq!(config.historical_days, 120);
        assert_eq!(config.forecast_days, 30);

        let config = ForecastConfig::new(None, Some(7));
        assert_eq!(config.historical_days, 90);
        assert_eq!(config.forecast_days, 7);
    }

    #[test]
    fn test_window_setters() {
        let config = ForecastConfig::default()
            .with_weekly_window(6)
            .with_monthly_lookback_months(24);
        assert_eq!(config.weekly_window, 6);
        assert_eq!(config.monthly_lookback_months, 24);
        assert!(config.validate().is_ok());

        assert!(ForecastConfig::default().with_weekly_window(0).validate().is_err());
        assert!(ForecastConfig::default()
            .with_monthly_lookback_months(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_out_of_range_settings() {
        assert!(ForecastConfig::default().with_forecast_days(6).validate().is_err());
        assert!(ForecastConfig::default().with_forecast_days(91).validate().is_err());
        assert!(ForecastConfig::default().with_historical_days(29).validate().is_err());
        assert!(ForecastConfig::default()
            .with_moving_average_window(0)
            .validate()
            .is_err());
        assert!(ForecastConfig::default()
            .with_utc_offset_hours(15)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config =
            ForecastConfig::from_toml_str("forecast_days = 14\nutc_offset_hours = 0\n").unwrap();
        assert_eq!(
            config,
            ForecastConfig {
                forecast_days: 14,
                utc_offset_hours: 0,
                ..ForecastConfig::default()
            }
        );
    }

    #[test]
    fn test_bad_toml() {
        let err = ForecastConfig::from_toml_str("forecast_days = \"soon\"").unwrap_err();
        assert!(matches!(err, ForecastError::Config(_)));

        let err = ForecastConfig::from_toml_str("forecast_days = 400").unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }
}
