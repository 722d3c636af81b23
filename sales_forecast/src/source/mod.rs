//! Historical sales data sources
//!
//! A [`HistoricalDataSource`] supplies completed-sales aggregates grouped by
//! day, ISO week, or month, plus the realized revenue of a single date.
//! Two implementations ship with the crate:
//!
//! - [`SeriesSource`]: pre-aggregated series held in memory
//! - [`OrderLedger`]: raw order records aggregated on demand

use crate::data::{HistoricalPoint, PeriodType};
use crate::error::Result;
use chrono::NaiveDate;

pub mod ledger;
pub mod series;

pub use ledger::{Order, OrderLedger, OrderStatus};
pub use series::SeriesSource;

/// Supplier of historical aggregates and realized actuals
pub trait HistoricalDataSource {
    /// One point per calendar date on or after `since`, chronological.
    fn query_daily(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>>;

    /// One point per ISO week (Monday first) on or after `since`. Each
    /// point is dated by the first day seen in that week.
    fn query_weekly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>>;

    /// One point per calendar month on or after `since`, dated the first.
    fn query_monthly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>>;

    /// Completed revenue on `date`; zero when nothing was sold.
    fn actual_revenue(&self, date: NaiveDate) -> Result<f64>;

    /// Dispatch to the query for `period_type`.
    fn query(&self, period_type: PeriodType, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        match period_type {
            PeriodType::Daily => self.query_daily(since),
            PeriodType::Weekly => self.query_weekly(since),
            PeriodType::Monthly => self.query_monthly(since),
        }
    }
}
