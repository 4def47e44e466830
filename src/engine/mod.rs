pub mod aggregate;
pub mod calendar;
pub mod chart;
pub mod compare;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AggregateStats, CalendarGrid, ChartPoint, IntensityThresholds, PeriodGranularity,
    ReportSeries, WeekComparisons,
};

/// Derives every dashboard view from a report series.
///
/// Holds configuration only. Each method is a pure function of its
/// arguments, so one engine can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsEngine {
    granularity: PeriodGranularity,
    thresholds: IntensityThresholds,
}

/// All views for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_for: NaiveDate,
    pub granularity: PeriodGranularity,
    pub stats: AggregateStats,
    pub comparisons: WeekComparisons,
    pub calendar: CalendarGrid,
    pub trend: Vec<ChartPoint>,
}

impl MetricsEngine {
    pub fn new(granularity: PeriodGranularity, thresholds: IntensityThresholds) -> Self {
        Self {
            granularity,
            thresholds,
        }
    }

    pub fn granularity(&self) -> PeriodGranularity {
        self.granularity
    }

    pub fn thresholds(&self) -> IntensityThresholds {
        self.thresholds
    }

    pub fn aggregate(&self, series: &ReportSeries) -> AggregateStats {
        aggregate::aggregate_stats(series, self.granularity)
    }

    pub fn compare(&self, series: &ReportSeries) -> WeekComparisons {
        compare::week_over_week(series, self.granularity)
    }

    pub fn calendar(&self, series: &ReportSeries, today: NaiveDate) -> CalendarGrid {
        calendar::build_grid(series, today, &self.thresholds)
    }

    pub fn trend(&self, series: &ReportSeries) -> Vec<ChartPoint> {
        chart::trend_series(series)
    }

    pub fn snapshot(&self, series: &ReportSeries, today: NaiveDate) -> DashboardSnapshot {
        log::debug!(
            "Building dashboard snapshot: {} records, granularity {}, today {}",
            series.len(),
            self.granularity,
            today
        );
        DashboardSnapshot {
            generated_for: today,
            granularity: self.granularity,
            stats: self.aggregate(series),
            comparisons: self.compare(series),
            calendar: self.calendar(series, today),
            trend: self.trend(series),
        }
    }
}

/// Rounds to one decimal place, halves away from zero.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
