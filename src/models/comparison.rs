use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Metrics tracked period over period, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Xp,
    Minutes,
    Lessons,
    AvgMinutesPerLesson,
    DailyMinutes,
    DailyLessons,
}

impl Metric {
    pub fn all() -> [Metric; 6] {
        [
            Metric::Xp,
            Metric::Minutes,
            Metric::Lessons,
            Metric::AvgMinutesPerLesson,
            Metric::DailyMinutes,
            Metric::DailyLessons,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Xp => "xp",
            Metric::Minutes => "minutes",
            Metric::Lessons => "lessons",
            Metric::AvgMinutesPerLesson => "avgMinutesPerLesson",
            Metric::DailyMinutes => "dailyMinutes",
            Metric::DailyLessons => "dailyLessons",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Xp => "XP",
            Metric::Minutes => "Minutes",
            Metric::Lessons => "Lessons",
            Metric::AvgMinutesPerLesson => "Min / lesson",
            Metric::DailyMinutes => "Min / day",
            Metric::DailyLessons => "Lessons / day",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::all()
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown metric: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Same,
}

impl Trend {
    pub fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            Trend::Up
        } else if diff < 0.0 {
            Trend::Down
        } else {
            Trend::Same
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Same => "=",
        }
    }
}

/// Latest period against the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekComparison {
    pub current: f64,
    pub previous: f64,
    pub diff: f64,
    pub percentage: i64,
    pub trend: Trend,
}

impl WeekComparison {
    /// All zeros, trend `same`. Used when there is nothing to compare against.
    pub fn neutral() -> Self {
        Self::default()
    }
}

pub type WeekComparisons = BTreeMap<Metric, WeekComparison>;
