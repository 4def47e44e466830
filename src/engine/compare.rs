use crate::models::{
    ActivityRecord, Metric, PeriodGranularity, ReportSeries, Trend, WeekComparison,
    WeekComparisons,
};

use super::{ratio, round_tenths};

/// Compares the two most recent periods for every tracked metric.
/// With fewer than two periods every metric is neutral.
pub fn week_over_week(series: &ReportSeries, granularity: PeriodGranularity) -> WeekComparisons {
    let Some((current, previous)) = series.current_and_previous() else {
        log::debug!(
            "Only {} record(s); week-over-week comparison is neutral",
            series.len()
        );
        return Metric::all()
            .into_iter()
            .map(|m| (m, WeekComparison::neutral()))
            .collect();
    };

    Metric::all()
        .into_iter()
        .map(|metric| {
            let cur = period_value(metric, current, granularity);
            let prev = period_value(metric, previous, granularity);
            (metric, compare_values(cur, prev))
        })
        .collect()
}

/// The value a single period contributes for `metric`.
pub fn period_value(metric: Metric, record: &ActivityRecord, granularity: PeriodGranularity) -> f64 {
    let days = granularity.days_per_period() as f64;
    match metric {
        Metric::Xp => record.xp as f64,
        Metric::Minutes => record.minutes as f64,
        Metric::Lessons => record.lessons as f64,
        Metric::AvgMinutesPerLesson => {
            round_tenths(ratio(record.minutes as f64, record.lessons as f64))
        }
        Metric::DailyMinutes => round_tenths(record.minutes as f64 / days),
        Metric::DailyLessons => round_tenths(record.lessons as f64 / days),
    }
}

pub fn compare_values(current: f64, previous: f64) -> WeekComparison {
    let diff = round_tenths(current - previous);
    // A zero baseline reports 0% rather than an infinite change.
    let percentage = if previous == 0.0 {
        0
    } else {
        (diff / previous * 100.0).round() as i64
    };
    WeekComparison {
        current,
        previous,
        diff,
        percentage,
        trend: Trend::from_diff(diff),
    }
}
