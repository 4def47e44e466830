use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::SourceError;
use crate::models::ActivityRecord;

/// A record as the report service sends it: the date is still the raw
/// string taken from the email header.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecord {
    pub date: String,
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

impl WireRecord {
    pub fn into_record(self) -> Result<ActivityRecord, SourceError> {
        Ok(ActivityRecord {
            date: parse_report_date(&self.date)?,
            subject: self.subject,
            xp: self.xp,
            minutes: self.minutes,
            lessons: self.lessons,
            streak: self.streak,
        })
    }
}

/// `{"success": true, "data": [...], "count": n}` or `{"success": false, "error": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<WireRecord>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Accepts `YYYY-MM-DD`, RFC 3339 or an RFC 2822 email `Date` header.
/// Timestamps resolve to the calendar day in their own offset.
pub fn parse_report_date(raw: &str) -> Result<NaiveDate, SourceError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.date_naive());
    }
    Err(SourceError::BadDate(raw.to_string()))
}

/// Decodes either the service envelope or a bare array of records.
/// Record order is preserved; ordering is checked by the caller.
pub fn decode_reports(json: &str) -> Result<Vec<ActivityRecord>, SourceError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let wire: Vec<WireRecord> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        let envelope: ReportEnvelope = serde_json::from_value(value)?;
        if !envelope.success {
            return Err(SourceError::Backend(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        if let Some(count) = envelope.count {
            if count != envelope.data.len() {
                log::warn!(
                    "Envelope count {} does not match {} records received",
                    count,
                    envelope.data.len()
                );
            }
        }
        envelope.data
    };

    log::debug!("Decoded {} wire records", wire.len());
    wire.into_iter().map(WireRecord::into_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_all_date_shapes() {
        assert_eq!(parse_report_date("2024-06-10").unwrap(), day("2024-06-10"));
        assert_eq!(
            parse_report_date("2024-06-10T23:30:00+09:00").unwrap(),
            day("2024-06-10")
        );
        assert_eq!(
            parse_report_date("Sat, 30 Aug 2025 05:00:37 +0000").unwrap(),
            day("2025-08-30")
        );
        // Stays on the sender's calendar day rather than converting to UTC.
        assert_eq!(
            parse_report_date("Mon, 1 Sep 2025 01:00:00 +0900").unwrap(),
            day("2025-09-01")
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_report_date("last tuesday"),
            Err(SourceError::BadDate(s)) if s == "last tuesday"
        ));
    }

    #[test]
    fn decodes_success_envelope() {
        let json = r#"{
            "success": true,
            "count": 2,
            "data": [
                {"date": "Sun, 31 Aug 2025 05:00:37 +0000", "subject": "週間レポート", "xp": 200, "minutes": 60, "lessons": 15, "streak": 6},
                {"date": "Sat, 30 Aug 2025 05:00:37 +0000", "subject": "週間レポート", "xp": 100, "minutes": 50, "lessons": 10, "streak": 5}
            ]
        }"#;
        let records = decode_reports(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, day("2025-08-31"));
        assert_eq!(records[0].xp, 200);
        assert_eq!(records[1].streak, 5);
    }

    #[test]
    fn backend_failure_is_an_error() {
        let json = r#"{"success": false, "error": "token expired"}"#;
        match decode_reports(json) {
            Err(SourceError::Backend(msg)) => assert_eq!(msg, "token expired"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn bare_array_and_missing_fields_default_to_zero() {
        let json = r#"[{"date": "2024-06-10", "xp": 30}]"#;
        let records = decode_reports(json).unwrap();
        assert_eq!(records[0].xp, 30);
        assert_eq!(records[0].minutes, 0);
        assert_eq!(records[0].subject, "");
    }

    #[test]
    fn negative_numbers_are_malformed() {
        let json = r#"[{"date": "2024-06-10", "xp": -5}]"#;
        assert!(matches!(decode_reports(json), Err(SourceError::Json(_))));
    }
}
