pub mod email;
pub mod payload;

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{ActivityRecord, ReportSeries};

pub use payload::{decode_reports, parse_report_date, ReportEnvelope};

/// Reads a saved report payload from disk.
pub fn load_records(path: &Path) -> Result<Vec<ActivityRecord>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    let records = decode_reports(&content).with_context(|| format!("Decoding {:?}", path))?;
    log::info!("Loaded {} report(s) from {:?}", records.len(), path);
    Ok(records)
}

/// Loads a payload and returns it newest-first. Out-of-order files are
/// sorted with a warning rather than rejected.
pub fn load_series(path: &Path) -> Result<ReportSeries> {
    let records = load_records(path)?;
    match ReportSeries::new(records.clone()) {
        Ok(series) => Ok(series),
        Err(e) => {
            log::warn!("{}; sorting by date", e);
            Ok(ReportSeries::from_unordered(records))
        }
    }
}
