use crate::models::{ChartPoint, ReportSeries};
use crate::utils::format::short_date;

/// Chart series in chronological order, oldest period first.
pub fn trend_series(series: &ReportSeries) -> Vec<ChartPoint> {
    series
        .records()
        .iter()
        .rev()
        .map(|r| ChartPoint {
            date: r.date,
            label: short_date(r.date),
            xp: r.xp,
            minutes: r.minutes,
            lessons: r.lessons,
        })
        .collect()
}
