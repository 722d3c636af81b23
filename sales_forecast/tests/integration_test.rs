use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::source::{Order, OrderLedger};
use sales_forecast::summary::ForecastSummary;
use sales_forecast::{
    AccuracyEvaluator, AccuracyRating, FixedClock, ForecastConfig, ForecastError,
    ForecastGenerator, ForecastQuery, ForecastStore, InMemoryForecastStore, PeriodType,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

// One completed 1000.00 order per day from Wednesday 5 June to Thursday 20 June,
// plus a cancelled order that must not count
fn create_order_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "created_at,total,status").unwrap();
    for day in 5..=20 {
        writeln!(file, "2024-06-{:02} 10:30:00,1000.00,completed", day).unwrap();
    }
    writeln!(file, "2024-06-12 18:00:00,450.00,cancelled").unwrap();

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load orders
    let order_file = create_order_file();
    let mut ledger = OrderLedger::from_csv(order_file.path()).unwrap();
    assert_eq!(ledger.len(), 17);

    // 2. Generate every period type on 20 June
    let store = InMemoryForecastStore::new();
    {
        let clock = FixedClock(date(6, 20));
        let generator =
            ForecastGenerator::new(&ledger, &store, &clock, ForecastConfig::default()).unwrap();

        let report = generator.generate_all();

        assert!(!report.is_complete());
        assert_eq!(
            report.generated_counts(),
            vec![(PeriodType::Daily, 30), (PeriodType::Monthly, 3)]
        );

        // Three ISO weeks of sales is not enough for a weekly forecast
        match report.error(PeriodType::Weekly) {
            Some(ForecastError::InsufficientHistory {
                required, found, ..
            }) => {
                assert_eq!(*required, 4);
                assert_eq!(*found, 3);
            }
            other => panic!("unexpected weekly outcome: {:?}", other),
        }

        let daily = report.forecasts(PeriodType::Daily).unwrap();
        assert_eq!(daily[0].forecast_date, date(6, 21));
        assert_eq!(daily[29].forecast_date, date(7, 20));
        for forecast in daily {
            assert_eq!(forecast.predicted_revenue, 1000.0);
            assert_eq!(forecast.lower_bound, 1000.0);
            assert_eq!(forecast.upper_bound, 1000.0);
        }

        let summary = ForecastSummary::from_forecasts(daily);
        assert_eq!(summary.total_predicted_revenue, 30000.0);

        let monthly = report.forecasts(PeriodType::Monthly).unwrap();
        let months: Vec<NaiveDate> = monthly.iter().map(|f| f.forecast_date).collect();
        assert_eq!(months, vec![date(7, 1), date(8, 1), date(9, 1)]);
    }
    assert_eq!(store.len(), 33);

    // 3. Record what actually sold over the next four days
    for day in 21..=24 {
        ledger.push(Order::completed_on(date(6, day), 1100.0)).unwrap();
    }

    // 4. Evaluate the last week on 25 June
    let clock = FixedClock(date(6, 25));
    let evaluator = AccuracyEvaluator::new(&ledger, &store, &clock);

    let report = evaluator.evaluate(PeriodType::Daily, 7).unwrap();

    assert_eq!(report.sample_count, 4);
    assert_eq!(report.mape, Some(9.09));
    assert_eq!(report.accuracy, Some(90.91));
    assert_eq!(report.rating, Some(AccuracyRating::VeryAccurate));

    // 5. Nothing weekly was stored
    let weekly = store
        .query(&ForecastQuery::new().period(PeriodType::Weekly))
        .unwrap();
    assert!(weekly.is_empty());
}

#[test]
fn test_regeneration_overwrites() {
    let order_file = create_order_file();
    let ledger = OrderLedger::from_csv(order_file.path()).unwrap();
    let store = InMemoryForecastStore::new();
    let clock = FixedClock(date(6, 20));
    let config = ForecastConfig::default().with_forecast_days(7);
    let generator = ForecastGenerator::new(&ledger, &store, &clock, config).unwrap();

    generator.generate_daily().unwrap();
    generator.generate_daily().unwrap();

    let stored = store
        .query(&ForecastQuery::upcoming(PeriodType::Daily, date(6, 20), 7).unwrap())
        .unwrap();
    assert_eq!(stored.len(), 7);
}
