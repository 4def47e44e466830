//! Dashboard metrics for learning-activity reports.
//!
//! [`engine::MetricsEngine`] turns a newest-first [`models::ReportSeries`]
//! into aggregate statistics, week-over-week comparisons, a 53-week calendar
//! heatmap and a chronological trend series. Everything else here (report
//! decoding, config, the CLI) feeds it or prints its output.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod source;
pub mod utils;

pub use engine::{DashboardSnapshot, MetricsEngine};
pub use error::{SeriesError, SourceError, ThresholdError};
pub use models::{ActivityRecord, PeriodGranularity, ReportSeries};
