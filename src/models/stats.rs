use serde::{Deserialize, Serialize};

/// Totals and averages over a whole report series.
///
/// `current_streak` is the streak of the most recent period. The highest
/// streak seen anywhere in the series is kept apart as `best_streak`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub periods: u32,
    pub total_days: u32,
    pub total_xp: u64,
    pub total_minutes: u64,
    pub total_lessons: u64,
    pub total_hours: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub avg_minutes_per_day: f64,
    pub avg_lessons_per_day: f64,
    pub avg_xp_per_day: f64,
    pub avg_minutes_per_week: f64,
    pub avg_xp_per_week: f64,
    pub avg_minutes_per_lesson: f64,
}

impl AggregateStats {
    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }
}
