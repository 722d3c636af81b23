//! # Sales Forecasting
//!
//! Umbrella crate for the sales forecasting workspace.
//!
//! - [`math`]: statistical estimators (moving averages, trend, seasonality, volatility)
//! - [`forecast`]: forecast generation, storage, and accuracy evaluation
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use sales_forecasting_workspace::forecast::data::HistoricalPoint;
//! use sales_forecasting_workspace::forecast::source::SeriesSource;
//! use sales_forecasting_workspace::forecast::{
//!     FixedClock, ForecastConfig, ForecastGenerator, InMemoryForecastStore, PeriodType,
//! };
//!
//! let may = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let source = SeriesSource::new()
//!     .with_series(
//!         PeriodType::Monthly,
//!         vec![
//!             HistoricalPoint::new(may, 30_000.0, 300),
//!             HistoricalPoint::new(june, 36_000.0, 320),
//!         ],
//!     )
//!     .unwrap();
//! let store = InMemoryForecastStore::new();
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
//!
//! let generator =
//!     ForecastGenerator::new(&source, &store, &clock, ForecastConfig::default()).unwrap();
//! let forecasts = generator.generate_monthly().unwrap();
//!
//! assert_eq!(forecasts.len(), 3);
//! assert_eq!(store.len(), 3);
//! ```

pub use sales_forecast as forecast;
pub use sales_math as math;
