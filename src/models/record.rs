use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SeriesError;

/// How long one reporting period covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    Daily,
    #[default]
    Weekly,
}

impl PeriodGranularity {
    pub fn days_per_period(&self) -> u32 {
        match self {
            PeriodGranularity::Daily => 1,
            PeriodGranularity::Weekly => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodGranularity::Daily => "daily",
            PeriodGranularity::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for PeriodGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodGranularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(PeriodGranularity::Daily),
            "weekly" | "week" => Ok(PeriodGranularity::Weekly),
            _ => Err(anyhow::anyhow!("Unknown period granularity: {}", s)),
        }
    }
}

/// One reporting period as delivered by the report service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub lessons: u32,
    #[serde(default)]
    pub streak: u32,
}

impl ActivityRecord {
    pub fn new(date: NaiveDate, xp: u32, minutes: u32, lessons: u32, streak: u32) -> Self {
        Self {
            date,
            subject: String::new(),
            xp,
            minutes,
            lessons,
            streak,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }
}

/// Records sorted newest-first: index 0 is the most recent period.
///
/// Every derived view compares "current" against "previous" by position, so
/// the ordering is checked once here instead of trusted everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportSeries {
    records: Vec<ActivityRecord>,
}

impl ReportSeries {
    /// Wraps records that must already be sorted by date, descending.
    /// Equal dates are accepted.
    pub fn new(records: Vec<ActivityRecord>) -> Result<Self, SeriesError> {
        for (index, pair) in records.windows(2).enumerate() {
            if pair[1].date > pair[0].date {
                return Err(SeriesError::NotNewestFirst {
                    index: index + 1,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }
        Ok(Self { records })
    }

    /// Sorts by date descending. Records sharing a date keep their relative order.
    pub fn from_unordered(mut records: Vec<ActivityRecord>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&ActivityRecord> {
        self.records.first()
    }

    /// The two most recent periods, if there are at least two.
    pub fn current_and_previous(&self) -> Option<(&ActivityRecord, &ActivityRecord)> {
        match self.records.as_slice() {
            [current, previous, ..] => Some((current, previous)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ActivityRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn accepts_newest_first_with_ties() {
        let series = ReportSeries::new(vec![
            ActivityRecord::new(day("2024-06-10"), 50, 20, 3, 5),
            ActivityRecord::new(day("2024-06-10"), 10, 5, 1, 5),
            ActivityRecord::new(day("2024-06-03"), 80, 45, 5, 4),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.latest().map(|r| r.xp), Some(50));
    }

    #[test]
    fn rejects_oldest_first() {
        let err = ReportSeries::new(vec![
            ActivityRecord::new(day("2024-06-03"), 80, 45, 5, 4),
            ActivityRecord::new(day("2024-06-10"), 50, 20, 3, 5),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SeriesError::NotNewestFirst {
                index: 1,
                previous: day("2024-06-03"),
                current: day("2024-06-10"),
            }
        );
    }

    #[test]
    fn from_unordered_sorts_descending() {
        let series = ReportSeries::from_unordered(vec![
            ActivityRecord::new(day("2024-05-27"), 1, 0, 0, 0),
            ActivityRecord::new(day("2024-06-10"), 2, 0, 0, 0),
            ActivityRecord::new(day("2024-06-03"), 3, 0, 0, 0),
        ]);
        let xps: Vec<u32> = series.records().iter().map(|r| r.xp).collect();
        assert_eq!(xps, vec![2, 3, 1]);
    }

    #[test]
    fn current_and_previous_needs_two_records() {
        let single = ReportSeries::new(vec![ActivityRecord::new(day("2024-06-10"), 1, 1, 1, 1)])
            .unwrap();
        assert!(single.current_and_previous().is_none());
        assert!(ReportSeries::default().current_and_previous().is_none());
    }

    #[test]
    fn granularity_parses_case_insensitively() {
        assert_eq!("Weekly".parse::<PeriodGranularity>().unwrap(), PeriodGranularity::Weekly);
        assert_eq!("day".parse::<PeriodGranularity>().unwrap(), PeriodGranularity::Daily);
        assert!("monthly".parse::<PeriodGranularity>().is_err());
    }
}
