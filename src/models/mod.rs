pub mod calendar;
pub mod chart;
pub mod comparison;
pub mod record;
pub mod stats;

pub use calendar::{
    CalendarCell, CalendarGrid, CalendarWeek, Intensity, IntensityThresholds, CALENDAR_DAYS,
    CALENDAR_WEEKS, DAYS_PER_WEEK,
};
pub use chart::ChartPoint;
pub use comparison::{Metric, Trend, WeekComparison, WeekComparisons};
pub use record::{ActivityRecord, PeriodGranularity, ReportSeries};
pub use stats::AggregateStats;
