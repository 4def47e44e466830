use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::{
    ActivityRecord, CalendarCell, CalendarGrid, CalendarWeek, Intensity, IntensityThresholds,
    ReportSeries, CALENDAR_WEEKS, DAYS_PER_WEEK,
};

/// Days between the reference day and the start of the window.
const LOOKBACK_DAYS: i64 = 364;

/// First day of the grid: the Sunday on or before `today - 364 days`.
pub fn grid_start(today: NaiveDate) -> NaiveDate {
    let start = today - Duration::days(LOOKBACK_DAYS);
    start - Duration::days(start.weekday().num_days_from_sunday() as i64)
}

/// Builds the 53-week heatmap ending at `today`.
///
/// Records are matched by calendar day. When two records share a day, the
/// one appearing later in the series wins.
pub fn build_grid(
    series: &ReportSeries,
    today: NaiveDate,
    thresholds: &IntensityThresholds,
) -> CalendarGrid {
    let mut by_date: HashMap<NaiveDate, &ActivityRecord> = HashMap::new();
    for record in series.records() {
        by_date.insert(record.date, record);
    }

    let start = grid_start(today);
    log::debug!(
        "Calendar window {} .. {} ({} records indexed)",
        start,
        start + Duration::days((CALENDAR_WEEKS * DAYS_PER_WEEK) as i64 - 1),
        by_date.len()
    );

    let weeks = (0..CALENDAR_WEEKS)
        .map(|week| CalendarWeek {
            days: std::array::from_fn(|weekday| {
                let offset = (week * DAYS_PER_WEEK + weekday) as i64;
                let date = start + Duration::days(offset);
                make_cell(date, weekday as u8, today, by_date.get(&date).copied(), thresholds)
            }),
        })
        .collect();

    CalendarGrid { today, weeks }
}

fn make_cell(
    date: NaiveDate,
    weekday: u8,
    today: NaiveDate,
    record: Option<&ActivityRecord>,
    thresholds: &IntensityThresholds,
) -> CalendarCell {
    let is_future = date > today;
    match record {
        Some(r) => CalendarCell {
            date,
            weekday,
            intensity: thresholds.classify(r.minutes),
            minutes: r.minutes,
            xp: r.xp,
            lessons: r.lessons,
            streak: r.streak,
            is_future,
        },
        None => CalendarCell {
            date,
            weekday,
            intensity: Intensity::None,
            minutes: 0,
            xp: 0,
            lessons: 0,
            streak: 0,
            is_future,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CALENDAR_DAYS;
    use chrono::Weekday;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn empty_grid(today: NaiveDate) -> CalendarGrid {
        build_grid(&ReportSeries::default(), today, &IntensityThresholds::default())
    }

    #[test]
    fn grid_is_53_by_7_starting_sunday() {
        let mut today = day("2024-01-01");
        // Every weekday as the reference day.
        for _ in 0..14 {
            let grid = empty_grid(today);
            assert_eq!(grid.weeks.len(), 53);
            assert_eq!(grid.cells().count(), CALENDAR_DAYS);
            assert_eq!(grid.start().map(|d| d.weekday()), Some(Weekday::Sun));
            today = today.succ_opt().unwrap();
        }
        let leap = empty_grid(day("2024-02-29"));
        assert_eq!(leap.cells().count(), 371);
    }

    #[test]
    fn start_is_sunday_on_or_before_lookback() {
        // 2024-06-12 - 364 days = 2023-06-14, a Wednesday.
        assert_eq!(grid_start(day("2024-06-12")), day("2023-06-11"));
        // 2024-06-09 - 364 days = 2023-06-11, already a Sunday.
        assert_eq!(grid_start(day("2024-06-09")), day("2023-06-11"));
    }

    #[test]
    fn days_are_consecutive_and_weekday_indexed() {
        let grid = empty_grid(day("2024-06-12"));
        let cells: Vec<&CalendarCell> = grid.cells().collect();
        for pair in cells.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
        for week in &grid.weeks {
            for (i, cell) in week.days.iter().enumerate() {
                assert_eq!(cell.weekday as usize, i);
                assert_eq!(cell.date.weekday().num_days_from_sunday() as usize, i);
            }
        }
    }

    #[test]
    fn today_is_inside_the_last_week() {
        let today = day("2024-06-12");
        let grid = empty_grid(today);
        let last = grid.weeks.last().unwrap();
        assert!(last.days.iter().any(|c| c.date == today));
        assert!(grid.cells().filter(|c| c.is_future).all(|c| c.date > today));
        // Wednesday: Thursday through Saturday are still ahead.
        assert_eq!(grid.cells().filter(|c| c.is_future).count(), 3);
    }

    #[test]
    fn records_fill_matching_cells() {
        let series = ReportSeries::new(vec![
            ActivityRecord::new(day("2024-06-10"), 50, 45, 3, 5),
            ActivityRecord::new(day("2024-06-03"), 80, 61, 5, 4),
            ActivityRecord::new(day("2024-05-27"), 0, 0, 0, 0),
        ])
        .unwrap();
        let grid = build_grid(&series, day("2024-06-12"), &IntensityThresholds::default());

        let medium = grid.cell(day("2024-06-10")).unwrap();
        assert_eq!(medium.intensity, Intensity::Medium);
        assert_eq!((medium.xp, medium.minutes, medium.lessons, medium.streak), (50, 45, 3, 5));

        assert_eq!(grid.cell(day("2024-06-03")).unwrap().intensity, Intensity::High);
        assert_eq!(grid.cell(day("2024-05-27")).unwrap().intensity, Intensity::None);

        let blank = grid.cell(day("2024-06-11")).unwrap();
        assert_eq!(blank.intensity, Intensity::None);
        assert_eq!(blank.minutes, 0);
        assert_eq!(grid.active_days(), 2);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let series = ReportSeries::new(vec![ActivityRecord::new(day("2020-01-01"), 10, 90, 1, 1)])
            .unwrap();
        let grid = build_grid(&series, day("2024-06-12"), &IntensityThresholds::default());
        assert_eq!(grid.active_days(), 0);
    }

    #[test]
    fn later_duplicate_wins() {
        let series = ReportSeries::new(vec![
            ActivityRecord::new(day("2024-06-10"), 1, 10, 1, 1),
            ActivityRecord::new(day("2024-06-10"), 2, 90, 2, 2),
        ])
        .unwrap();
        let grid = build_grid(&series, day("2024-06-12"), &IntensityThresholds::default());
        let cell = grid.cell(day("2024-06-10")).unwrap();
        assert_eq!(cell.xp, 2);
        assert_eq!(cell.intensity, Intensity::High);
    }
}
