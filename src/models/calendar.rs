use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;

pub const DAYS_PER_WEEK: usize = 7;
pub const CALENDAR_WEEKS: usize = 53;
pub const CALENDAR_DAYS: usize = CALENDAR_WEEKS * DAYS_PER_WEEK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::None => "none",
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

fn default_low() -> u32 {
    1
}
fn default_medium() -> u32 {
    31
}
fn default_high() -> u32 {
    61
}

/// Inclusive lower bounds, in minutes, of each intensity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityThresholds {
    #[serde(default = "default_low")]
    pub low: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default = "default_high")]
    pub high: u32,
}

impl Default for IntensityThresholds {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl IntensityThresholds {
    pub fn new(low: u32, medium: u32, high: u32) -> Result<Self, ThresholdError> {
        let thresholds = Self { low, medium, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.low < 1 {
            return Err(ThresholdError::LowTooSmall(self.low));
        }
        if !(self.low < self.medium && self.medium < self.high) {
            return Err(ThresholdError::NotAscending {
                low: self.low,
                medium: self.medium,
                high: self.high,
            });
        }
        Ok(())
    }

    pub fn classify(&self, minutes: u32) -> Intensity {
        if minutes >= self.high {
            Intensity::High
        } else if minutes >= self.medium {
            Intensity::Medium
        } else if minutes >= self.low {
            Intensity::Low
        } else {
            Intensity::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    pub intensity: Intensity,
    pub minutes: u32,
    pub xp: u32,
    pub lessons: u32,
    pub streak: u32,
    pub is_future: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub days: [CalendarCell; DAYS_PER_WEEK],
}

impl CalendarWeek {
    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }
}

/// Weeks run oldest to newest; days inside a week run Sunday to Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub today: NaiveDate,
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells().find(|c| c.date == date)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.weeks.first().map(CalendarWeek::first_day)
    }

    pub fn active_days(&self) -> usize {
        self.cells().filter(|c| c.intensity != Intensity::None).count()
    }
}
