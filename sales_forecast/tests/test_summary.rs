use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::data::HistoricalPoint;
use sales_forecast::summary::{insights, revenue_variance, ForecastSummary, InsightKind};
use sales_forecast::{Forecast, ForecastMetadata, ForecastMethod, PeriodType};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn create_forecasts(revenues: &[f64]) -> Vec<Forecast> {
    revenues
        .iter()
        .enumerate()
        .map(|(i, &revenue)| Forecast {
            forecast_date: date(15 + i as u32),
            period_type: PeriodType::Daily,
            predicted_revenue: revenue,
            predicted_transactions: revenue / 100.0,
            lower_bound: revenue * 0.9,
            upper_bound: revenue * 1.1,
            confidence_score: 0.5,
            metadata: ForecastMetadata {
                method: ForecastMethod::WeightedMaWithSeasonality,
                trend_slope: 0.0,
                seasonal_factor: Some(1.0),
                base_revenue: Some(revenue),
            },
        })
        .collect()
}

fn create_history(revenue: f64) -> Vec<HistoricalPoint> {
    (1..=14)
        .map(|d| HistoricalPoint::new(date(d), revenue, 10))
        .collect()
}

#[test]
fn test_summary_totals() {
    let forecasts = create_forecasts(&[1000.0, 1200.0, 800.0]);

    let summary = ForecastSummary::from_forecasts(&forecasts);

    assert_eq!(summary.total_predicted_revenue, 3000.0);
    assert_eq!(summary.average_predicted_revenue, Some(1000.0));
    assert_eq!(summary.total_predicted_transactions, 30.0);
    assert_eq!(summary.start, Some(date(15)));
    assert_eq!(summary.end, Some(date(17)));
}

#[test]
fn test_upward_trend_insight() {
    let forecasts = create_forecasts(&[1100.0, 1300.0]);
    let found = insights(&forecasts, &create_history(1000.0));

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].kind, InsightKind::Positive);
    assert!(found[0].message.contains("20.0%"));
    assert_eq!(found[1].kind, InsightKind::Info);
    // 2024-06-16 is a Sunday
    assert!(found[1].message.contains("Sunday, 16 June"));
    assert!(found[1].message.contains("1300"));
}

#[test]
fn test_downward_trend_insight() {
    let forecasts = create_forecasts(&[800.0, 900.0]);
    let found = insights(&forecasts, &create_history(1000.0));

    assert_eq!(found[0].kind, InsightKind::Warning);
    assert!(found[0].message.contains("15.0%"));
}

#[test]
fn test_flat_forecast_only_reports_peak() {
    let forecasts = create_forecasts(&[1010.0, 990.0]);
    let found = insights(&forecasts, &create_history(1000.0));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, InsightKind::Info);
}

#[test]
fn test_peak_tie_reports_earliest_date() {
    let forecasts = create_forecasts(&[900.0, 1200.0, 1200.0]);
    let found = insights(&forecasts, &create_history(1000.0));

    let peak = found.last().unwrap();
    assert_eq!(peak.kind, InsightKind::Info);
    // 2024-06-16 (Sunday) and 2024-06-17 (Monday) tie
    assert!(peak.message.contains("Sunday, 16 June"));
}

#[test]
fn test_variance_against_prediction() {
    let forecasts = create_forecasts(&[1250.0]);
    assert_eq!(revenue_variance(1000.0, forecasts[0].predicted_revenue), Some(-20.0));
}
