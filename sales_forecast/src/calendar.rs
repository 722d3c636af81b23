//! Clock and calendar arithmetic
//!
//! "Today" always comes from a [`Clock`] so that forecast dates are
//! deterministic under test. Period normalization follows ISO weeks
//! (Monday first) and calendar months.

use crate::data::PeriodType;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, FixedOffset, Months, NaiveDate, Utc};

/// Source of the current local date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock at a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Clock at a whole-hour offset from UTC.
    pub fn with_utc_offset_hours(hours: i32) -> Result<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!("Invalid UTC offset: {}h", hours))
            })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Monday of the ISO week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn out_of_range(date: NaiveDate, what: &str) -> ForecastError {
    ForecastError::InvalidParameter(format!("Date out of range: {} {}", date, what))
}

/// `date` moved by `days`, which may be negative.
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| out_of_range(date, &format!("shifted by {} days", days)))
}

/// `date` moved back by `months` calendar months, clamped to month end.
pub fn months_before(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| out_of_range(date, &format!("minus {} months", months)))
}

impl PeriodType {
    /// Start of the period containing `date`.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            PeriodType::Daily => date,
            PeriodType::Weekly => start_of_week(date),
            PeriodType::Monthly => start_of_month(date),
        }
    }

    /// Date of forecast step `step` (1-based) counted from `today`.
    ///
    /// Monthly steps are taken from the first of the current month so a run
    /// on the 31st never skips a short month.
    pub fn step_date(&self, today: NaiveDate, step: u32) -> Result<NaiveDate> {
        let date = match self {
            PeriodType::Daily => today.checked_add_days(Days::new(u64::from(step))),
            PeriodType::Weekly => today
                .checked_add_days(Days::new(7 * u64::from(step)))
                .map(start_of_week),
            PeriodType::Monthly => start_of_month(today).checked_add_months(Months::new(step)),
        };
        date.ok_or_else(|| out_of_range(today, &format!("plus {} {} steps", step, self)))
    }
}
