//! Order ledger: aggregates raw orders into historical series
//!
//! Only completed orders count toward revenue. Orders are bucketed by the
//! local calendar date of `created_at`.

use super::HistoricalDataSource;
use crate::calendar::start_of_month;
use crate::data::HistoricalPoint;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

/// Lifecycle state of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "completed" => OrderStatus::Completed,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => "pending".to_string(),
            OrderStatus::Completed => "completed".to_string(),
            OrderStatus::Cancelled => "cancelled".to_string(),
            OrderStatus::Other(s) => s,
        }
    }
}

/// A single sales order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub created_at: NaiveDateTime,
    pub total: f64,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(created_at: NaiveDateTime, total: f64, status: OrderStatus) -> Self {
        Self {
            created_at,
            total,
            status,
        }
    }

    /// Completed order on the given date at midnight, handy for fixtures.
    pub fn completed_on(date: NaiveDate, total: f64) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN), total, OrderStatus::Completed)
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    pub fn date(&self) -> NaiveDate {
        self.created_at.date()
    }
}

#[derive(Debug, Deserialize)]
struct OrderRecord {
    created_at: String,
    total: f64,
    status: OrderStatus,
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in &TIMESTAMP_FORMATS[..2] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw, TIMESTAMP_FORMATS[2])
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| ForecastError::DataSource(format!("Unparseable order timestamp: {}", raw)))
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    first_date: Option<NaiveDate>,
    revenue: f64,
    count: u64,
}

impl Bucket {
    fn add(&mut self, order: &Order) {
        let date = order.date();
        self.first_date = Some(self.first_date.map_or(date, |d| d.min(date)));
        self.revenue += order.total;
        self.count += 1;
    }
}

/// In-memory order book implementing [`HistoricalDataSource`]
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new(orders: Vec<Order>) -> Result<Self> {
        if let Some(bad) = orders.iter().find(|o| !o.total.is_finite() || o.total < 0.0) {
            return Err(ForecastError::DataSource(format!(
                "Invalid order total {} at {}",
                bad.total, bad.created_at
            )));
        }
        Ok(Self { orders })
    }

    /// Load orders from a CSV file with a `created_at,total,status` header.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load orders from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut orders = Vec::new();
        for record in csv_reader.deserialize::<OrderRecord>() {
            let record = record?;
            orders.push(Order::new(
                parse_timestamp(&record.created_at)?,
                record.total,
                record.status,
            ));
        }
        log::debug!("Loaded {} orders", orders.len());
        Self::new(orders)
    }

    pub fn push(&mut self, order: Order) -> Result<()> {
        if !order.total.is_finite() || order.total < 0.0 {
            return Err(ForecastError::DataSource(format!(
                "Invalid order total {}",
                order.total
            )));
        }
        self.orders.push(order);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn completed_since(&self, since: NaiveDate) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |o| o.is_completed() && o.date() >= since)
    }

    fn aggregate<K, F>(&self, since: NaiveDate, key: F) -> BTreeMap<K, Bucket>
    where
        K: Ord,
        F: Fn(NaiveDate) -> K,
    {
        let mut buckets: BTreeMap<K, Bucket> = BTreeMap::new();
        for order in self.completed_since(since) {
            buckets.entry(key(order.date())).or_default().add(order);
        }
        buckets
    }

    fn to_points<K>(
        buckets: BTreeMap<K, Bucket>,
        date_of: impl Fn(&K, &Bucket) -> NaiveDate,
    ) -> Vec<HistoricalPoint> {
        buckets
            .iter()
            .map(|(key, bucket)| {
                HistoricalPoint::new(date_of(key, bucket), bucket.revenue, bucket.count)
            })
            .collect()
    }
}

impl HistoricalDataSource for OrderLedger {
    fn query_daily(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        let buckets = self.aggregate(since, |d| d);
        Ok(Self::to_points(buckets, |date, _| *date))
    }

    fn query_weekly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        let buckets = self.aggregate(since, |d| {
            let week = d.iso_week();
            (week.year(), week.week())
        });
        Ok(Self::to_points(buckets, |_, bucket| {
            bucket.first_date.unwrap_or(NaiveDate::MIN)
        }))
    }

    fn query_monthly(&self, since: NaiveDate) -> Result<Vec<HistoricalPoint>> {
        let buckets = self.aggregate(since, start_of_month);
        Ok(Self::to_points(buckets, |month, _| *month))
    }

    fn actual_revenue(&self, date: NaiveDate) -> Result<f64> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.is_completed() && o.date() == date)
            .map(|o| o.total)
            .sum())
    }
}
