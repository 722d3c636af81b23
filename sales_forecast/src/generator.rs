//! Forecast generation
//!
//! For each granularity the generator reads history from a
//! [`HistoricalDataSource`], fits the estimators once, then walks the horizon
//! step by step, upserting one [`Forecast`] per step into a [`ForecastStore`].
//!
//! | Granularity | Min history | Horizon | Base average |
//! |---|---|---|---|
//! | daily | 14 | `forecast_days` | weighted MA, window 7 |
//! | weekly | 4 | `ceil(forecast_days / 7)` | weighted MA, window 4 |
//! | monthly | 1 | `max(3, ceil(forecast_days / 30))` | simple MA, window `min(3, n)` |

use crate::calendar::{months_before, shift_days, Clock};
use crate::config::ForecastConfig;
use crate::data::{
    revenues, transaction_counts, validate_series, Forecast, ForecastMetadata, ForecastMethod,
    HistoricalPoint, PeriodType,
};
use crate::error::{ForecastError, Result};
use crate::source::HistoricalDataSource;
use crate::store::ForecastStore;
use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use sales_math::{
    confidence_score, interval_margin, linear_trend, simple_moving_average, volatility,
    weekly_seasonality, weighted_moving_average, LinearTrend, WeeklySeasonality,
};

/// Monthly forecasts with fewer history points use a fixed relative margin.
const MONTHLY_MIN_POINTS_FOR_VOLATILITY: usize = 3;
const THIN_HISTORY_MARGIN_RATIO: f64 = 0.3;
const MONTHLY_MIN_STEPS: u32 = 3;
const MONTHLY_MAX_WINDOW: usize = 3;

impl PeriodType {
    /// Fewest history points a forecast run accepts.
    pub fn min_history(&self) -> usize {
        match self {
            PeriodType::Daily => 14,
            PeriodType::Weekly => 4,
            PeriodType::Monthly => 1,
        }
    }

    /// Number of forecast steps for a horizon of `forecast_days`.
    pub fn horizon(&self, forecast_days: u32) -> u32 {
        match self {
            PeriodType::Daily => forecast_days,
            PeriodType::Weekly => forecast_days.div_ceil(7),
            PeriodType::Monthly => forecast_days.div_ceil(30).max(MONTHLY_MIN_STEPS),
        }
    }
}

/// Estimates fitted once per run and shared by every step
#[derive(Debug, Clone)]
struct FittedSeries {
    points: usize,
    base_revenue: f64,
    base_transactions: f64,
    revenue_trend: LinearTrend,
    transaction_trend: LinearTrend,
    volatility: f64,
    seasonality: Option<WeeklySeasonality>,
}

/// Generates and stores forecasts for each granularity
pub struct ForecastGenerator<'a> {
    source: &'a dyn HistoricalDataSource,
    store: &'a dyn ForecastStore,
    clock: &'a dyn Clock,
    config: ForecastConfig,
}

impl<'a> ForecastGenerator<'a> {
    /// Create a generator, rejecting out-of-range settings.
    pub fn new(
        source: &'a dyn HistoricalDataSource,
        store: &'a dyn ForecastStore,
        clock: &'a dyn Clock,
        config: ForecastConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            store,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn generate_daily(&self) -> Result<Vec<Forecast>> {
        self.generate(PeriodType::Daily)
    }

    pub fn generate_weekly(&self) -> Result<Vec<Forecast>> {
        self.generate(PeriodType::Weekly)
    }

    pub fn generate_monthly(&self) -> Result<Vec<Forecast>> {
        self.generate(PeriodType::Monthly)
    }

    /// Run every granularity. A failure in one does not stop the others.
    pub fn generate_all(&self) -> GenerationReport {
        let outcomes = PeriodType::ALL
            .iter()
            .map(|&period_type| {
                let outcome = self.generate(period_type);
                if let Err(e) = &outcome {
                    warn!("{} forecast generation failed: {}", period_type, e);
                }
                (period_type, outcome)
            })
            .collect();

        GenerationReport { outcomes }
    }

    /// Generate, store, and return the forecasts for one granularity in
    /// increasing date order.
    pub fn generate(&self, period_type: PeriodType) -> Result<Vec<Forecast>> {
        let today = self.clock.today();
        let since = self.history_start(period_type, today)?;
        info!("Generating {} forecasts from history since {}", period_type, since);

        let history = self.source.query(period_type, since)?;
        validate_series(&history)?;

        let required = period_type.min_history();
        if history.len() < required {
            return Err(ForecastError::InsufficientHistory {
                period_type,
                required,
                found: history.len(),
            });
        }

        let fitted = self.fit(period_type, &history)?;
        debug!(
            "{} fit: base revenue {:.2}, slope {:.4}, volatility {:.2}",
            period_type, fitted.base_revenue, fitted.revenue_trend.slope, fitted.volatility
        );

        let horizon = period_type.horizon(self.config.forecast_days);
        let mut forecasts = Vec::with_capacity(horizon as usize);
        for step in 1..=horizon {
            let forecast_date = period_type.step_date(today, step)?;
            let forecast = Self::forecast_step(period_type, &fitted, forecast_date, step);
            forecasts.push(self.store.upsert(forecast)?);
        }

        info!("Stored {} {} forecasts", forecasts.len(), period_type);
        Ok(forecasts)
    }

    fn history_start(&self, period_type: PeriodType, today: NaiveDate) -> Result<NaiveDate> {
        match period_type {
            PeriodType::Daily | PeriodType::Weekly => {
                shift_days(today, -i64::from(self.config.historical_days))
            }
            PeriodType::Monthly => months_before(today, self.config.monthly_lookback_months),
        }
    }

    fn fit(&self, period_type: PeriodType, history: &[HistoricalPoint]) -> Result<FittedSeries> {
        let revenue = revenues(history);
        let transactions = transaction_counts(history);

        let (base_revenue, base_transactions) = match period_type {
            PeriodType::Daily => {
                let window = self.config.moving_average_window;
                (
                    weighted_moving_average(&revenue, window)?,
                    weighted_moving_average(&transactions, window)?,
                )
            }
            PeriodType::Weekly => {
                let window = self.config.weekly_window;
                (
                    weighted_moving_average(&revenue, window)?,
                    weighted_moving_average(&transactions, window)?,
                )
            }
            PeriodType::Monthly => {
                let window = history.len().min(MONTHLY_MAX_WINDOW);
                (
                    simple_moving_average(&revenue, window)?,
                    simple_moving_average(&transactions, window)?,
                )
            }
        };

        let seasonality = match period_type {
            PeriodType::Daily => Some(weekly_seasonality(
                history.iter().map(|p| (p.period_start.weekday(), p.revenue)),
            )),
            PeriodType::Weekly | PeriodType::Monthly => None,
        };

        Ok(FittedSeries {
            points: history.len(),
            base_revenue,
            base_transactions,
            revenue_trend: linear_trend(&revenue),
            transaction_trend: linear_trend(&transactions),
            volatility: volatility(&revenue),
            seasonality,
        })
    }

    fn forecast_step(
        period_type: PeriodType,
        fitted: &FittedSeries,
        forecast_date: NaiveDate,
        step: u32,
    ) -> Forecast {
        let steps = f64::from(step);
        let trended_revenue = fitted.base_revenue + fitted.revenue_trend.slope * steps;

        let seasonal_factor = fitted
            .seasonality
            .map(|s| s.factor(forecast_date.weekday()));
        let (predicted_revenue, predicted_transactions) = match seasonal_factor {
            Some(factor) => (trended_revenue * factor, fitted.base_transactions * factor),
            None => (
                trended_revenue,
                fitted.base_transactions + fitted.transaction_trend.slope * steps,
            ),
        };

        let margin = match period_type {
            PeriodType::Monthly if fitted.points < MONTHLY_MIN_POINTS_FOR_VOLATILITY => {
                fitted.base_revenue * THIN_HISTORY_MARGIN_RATIO * steps.sqrt()
            }
            _ => interval_margin(fitted.volatility, step),
        };

        let lower_bound = (predicted_revenue - margin).max(0.0);
        // Only the lower side is clamped; the floor keeps upper >= lower.
        let upper_bound = (predicted_revenue + margin).max(lower_bound);

        debug!(
            "{} step {} ({}): revenue {:.2}, margin {:.2}",
            period_type, step, forecast_date, predicted_revenue, margin
        );

        Forecast {
            forecast_date,
            period_type,
            predicted_revenue: predicted_revenue.max(0.0),
            predicted_transactions: predicted_transactions.max(0.0),
            lower_bound,
            upper_bound,
            confidence_score: confidence_score(step, fitted.points),
            metadata: ForecastMetadata {
                method: ForecastMethod::for_period(period_type),
                trend_slope: fitted.revenue_trend.slope,
                seasonal_factor,
                base_revenue: seasonal_factor.map(|_| fitted.base_revenue),
            },
        }
    }
}

/// Per-granularity outcome of [`ForecastGenerator::generate_all`]
#[derive(Debug)]
pub struct GenerationReport {
    outcomes: Vec<(PeriodType, Result<Vec<Forecast>>)>,
}

impl GenerationReport {
    pub fn outcomes(&self) -> &[(PeriodType, Result<Vec<Forecast>>)] {
        &self.outcomes
    }

    fn outcome(&self, period_type: PeriodType) -> Option<&Result<Vec<Forecast>>> {
        self.outcomes
            .iter()
            .find(|(p, _)| *p == period_type)
            .map(|(_, outcome)| outcome)
    }

    /// Forecasts generated for `period_type`, if that run succeeded.
    pub fn forecasts(&self, period_type: PeriodType) -> Option<&[Forecast]> {
        match self.outcome(period_type) {
            Some(Ok(forecasts)) => Some(forecasts),
            _ => None,
        }
    }

    /// Error raised by the `period_type` run, if it failed.
    pub fn error(&self, period_type: PeriodType) -> Option<&ForecastError> {
        match self.outcome(period_type) {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }

    /// Number of forecasts stored per successful granularity.
    pub fn generated_counts(&self) -> Vec<(PeriodType, usize)> {
        self.outcomes
            .iter()
            .filter_map(|(p, outcome)| outcome.as_ref().ok().map(|f| (*p, f.len())))
            .collect()
    }

    pub fn failures(&self) -> Vec<(PeriodType, &ForecastError)> {
        self.outcomes
            .iter()
            .filter_map(|(p, outcome)| outcome.as_ref().err().map(|e| (*p, e)))
            .collect()
    }

    /// True when every granularity succeeded.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_ok())
    }
}
