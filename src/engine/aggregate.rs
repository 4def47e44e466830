use crate::models::{AggregateStats, PeriodGranularity, ReportSeries};

use super::{ratio, round_tenths};

pub fn aggregate_stats(series: &ReportSeries, granularity: PeriodGranularity) -> AggregateStats {
    let records = series.records();
    if records.is_empty() {
        return AggregateStats::default();
    }

    let total_xp: u64 = records.iter().map(|r| r.xp as u64).sum();
    let total_minutes: u64 = records.iter().map(|r| r.minutes as u64).sum();
    let total_lessons: u64 = records.iter().map(|r| r.lessons as u64).sum();

    let current_streak = series.latest().map(|r| r.streak).unwrap_or(0);
    let best_streak = records.iter().map(|r| r.streak).max().unwrap_or(0);

    let periods = records.len() as u32;
    let total_days = periods * granularity.days_per_period();
    let days = total_days as f64;
    let weeks = days / 7.0;

    AggregateStats {
        periods,
        total_days,
        total_xp,
        total_minutes,
        total_lessons,
        total_hours: round_tenths(total_minutes as f64 / 60.0),
        current_streak,
        best_streak,
        avg_minutes_per_day: round_tenths(ratio(total_minutes as f64, days)),
        avg_lessons_per_day: round_tenths(ratio(total_lessons as f64, days)),
        avg_xp_per_day: round_tenths(ratio(total_xp as f64, days)),
        avg_minutes_per_week: round_tenths(ratio(total_minutes as f64, weeks)),
        avg_xp_per_week: round_tenths(ratio(total_xp as f64, weeks)),
        avg_minutes_per_lesson: round_tenths(ratio(total_minutes as f64, total_lessons as f64)),
    }
}
