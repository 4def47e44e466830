use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("records must be newest-first: record {index} ({current}) is later than record {} ({previous})", .index - 1)]
    NotNewestFirst {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("low threshold must be at least 1 minute, got {0}")]
    LowTooSmall(u32),
    #[error("thresholds must be strictly ascending (low {low} < medium {medium} < high {high})")]
    NotAscending { low: u32, medium: u32, high: u32 },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("report service returned an error: {0}")]
    Backend(String),
    #[error("unrecognised date '{0}'")]
    BadDate(String),
    #[error("malformed report payload: {0}")]
    Json(#[from] serde_json::Error),
}
