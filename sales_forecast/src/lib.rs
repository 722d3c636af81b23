//! # Sales Forecast
//!
//! Short-horizon sales forecasting from historical transaction aggregates,
//! with accuracy evaluation against realized revenue.
//!
//! ## Features
//!
//! - Daily, weekly, and monthly forecasts with 95% confidence intervals
//! - Weighted moving averages, linear trend, and weekday seasonality
//! - Upsert-by-key forecast storage: re-running a generation overwrites
//! - MAPE-based accuracy reports with a qualitative rating
//! - Pluggable data sources and stores behind small traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_forecast::calendar::SystemClock;
//! use sales_forecast::source::OrderLedger;
//! use sales_forecast::store::InMemoryForecastStore;
//! use sales_forecast::{AccuracyEvaluator, ForecastConfig, ForecastGenerator, PeriodType};
//!
//! # fn main() -> sales_forecast::error::Result<()> {
//! let config = ForecastConfig::from_file("forecast.toml")?;
//! let clock = SystemClock::with_utc_offset_hours(config.utc_offset_hours)?;
//! let ledger = OrderLedger::from_csv("orders.csv")?;
//! let store = InMemoryForecastStore::new();
//!
//! let generator = ForecastGenerator::new(&ledger, &store, &clock, config)?;
//! let report = generator.generate_all();
//! for (period, count) in report.generated_counts() {
//!     println!("{}: {} forecasts generated", period, count);
//! }
//!
//! let evaluator = AccuracyEvaluator::new(&ledger, &store, &clock);
//! println!("{}", evaluator.evaluate(PeriodType::Daily, 7)?);
//! # Ok(())
//! # }
//! ```

pub mod accuracy;
pub mod calendar;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod source;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use crate::accuracy::{AccuracyEvaluator, AccuracyReport};
pub use crate::calendar::{Clock, FixedClock, SystemClock};
pub use crate::config::ForecastConfig;
pub use crate::data::{Forecast, ForecastMetadata, ForecastMethod, HistoricalPoint, PeriodType};
pub use crate::error::ForecastError;
pub use crate::generator::{ForecastGenerator, GenerationReport};
pub use crate::metrics::AccuracyRating;
pub use crate::source::HistoricalDataSource;
pub use crate::store::{ForecastQuery, ForecastStore, InMemoryForecastStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
