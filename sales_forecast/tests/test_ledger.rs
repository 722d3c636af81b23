use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use sales_forecast::data::HistoricalPoint;
use sales_forecast::source::{HistoricalDataSource, Order, OrderLedger, OrderStatus};
use sales_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(m, d).and_hms_opt(h, 0, 0).unwrap()
}

fn create_ledger() -> OrderLedger {
    OrderLedger::new(vec![
        // ISO week 2024-W10 (Mon 4 March), first sale on Tuesday
        Order::new(at(3, 5, 9), 100.0, OrderStatus::Completed),
        Order::new(at(3, 5, 17), 50.0, OrderStatus::Completed),
        Order::new(at(3, 6, 12), 70.0, OrderStatus::Completed),
        Order::new(at(3, 6, 13), 999.0, OrderStatus::Cancelled),
        // 2024-W11
        Order::new(at(3, 11, 8), 200.0, OrderStatus::Completed),
        Order::new(at(3, 12, 8), 10.0, OrderStatus::Pending),
        // April, 2024-W14
        Order::new(at(4, 2, 10), 300.0, OrderStatus::Completed),
    ])
    .unwrap()
}

#[test]
fn test_daily_aggregation() {
    let ledger = create_ledger();

    let daily = ledger.query_daily(date(1, 1)).unwrap();

    assert_eq!(
        daily,
        vec![
            HistoricalPoint::new(date(3, 5), 150.0, 2),
            HistoricalPoint::new(date(3, 6), 70.0, 1),
            HistoricalPoint::new(date(3, 11), 200.0, 1),
            HistoricalPoint::new(date(4, 2), 300.0, 1),
        ]
    );

    let since = ledger.query_daily(date(3, 6)).unwrap();
    assert_eq!(since.len(), 3);
    assert_eq!(since[0].period_start, date(3, 6));
}

#[test]
fn test_weekly_aggregation_dates_by_first_sale() {
    let ledger = create_ledger();

    let weekly = ledger.query_weekly(date(1, 1)).unwrap();

    assert_eq!(
        weekly,
        vec![
            HistoricalPoint::new(date(3, 5), 220.0, 3),
            HistoricalPoint::new(date(3, 11), 200.0, 1),
            HistoricalPoint::new(date(4, 2), 300.0, 1),
        ]
    );
}

#[test]
fn test_monthly_aggregation() {
    let ledger = create_ledger();

    let monthly = ledger.query_monthly(date(1, 1)).unwrap();

    assert_eq!(
        monthly,
        vec![
            HistoricalPoint::new(date(3, 1), 420.0, 4),
            HistoricalPoint::new(date(4, 1), 300.0, 1),
        ]
    );
}

#[test]
fn test_actual_revenue_counts_completed_orders_only() {
    let ledger = create_ledger();

    assert_eq!(ledger.actual_revenue(date(3, 5)).unwrap(), 150.0);
    assert_eq!(ledger.actual_revenue(date(3, 6)).unwrap(), 70.0);
    assert_eq!(ledger.actual_revenue(date(3, 12)).unwrap(), 0.0);
    assert_eq!(ledger.actual_revenue(date(5, 1)).unwrap(), 0.0);
}

#[test]
fn test_year_boundary_week() {
    // 2024-12-30 (Mon) and 2025-01-02 (Thu) share ISO week 2025-W01
    let ledger = OrderLedger::new(vec![
        Order::completed_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), 10.0),
        Order::completed_on(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), 15.0),
    ])
    .unwrap();

    let weekly = ledger.query_weekly(date(12, 1)).unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].period_start, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert_eq!(weekly[0].revenue, 25.0);
}

#[test]
fn test_load_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "created_at,total,status").unwrap();
    writeln!(file, "2024-03-05 09:00:00,100.5,completed").unwrap();
    writeln!(file, "2024-03-05T18:30:00, 49.5 ,Completed").unwrap();
    writeln!(file, "2024-03-06,80,cancelled").unwrap();
    writeln!(file, "2024-03-07 10:00:00,20,refunded").unwrap();
    file.flush().unwrap();

    let ledger = OrderLedger::from_csv(file.path()).unwrap();

    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.actual_revenue(date(3, 5)).unwrap(), 150.0);
    assert_eq!(ledger.query_daily(date(3, 1)).unwrap().len(), 1);
}

#[test]
fn test_csv_errors() {
    let bad_total = "created_at,total,status\n2024-03-05,abc,completed\n";
    assert!(matches!(
        OrderLedger::from_reader(bad_total.as_bytes()),
        Err(ForecastError::Csv(_))
    ));

    let bad_date = "created_at,total,status\n05/03/2024,10,completed\n";
    assert!(matches!(
        OrderLedger::from_reader(bad_date.as_bytes()),
        Err(ForecastError::DataSource(_))
    ));

    assert!(matches!(
        OrderLedger::from_csv("/nonexistent/orders.csv"),
        Err(ForecastError::Io(_))
    ));
}
