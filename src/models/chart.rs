use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One x-axis position of the XP / minutes trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub label: String,
    pub xp: u32,
    pub minutes: u32,
    pub lessons: u32,
}
