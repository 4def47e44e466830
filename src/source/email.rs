//! Weekly progress emails: recognising them and pulling the numbers out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::models::ActivityRecord;
use crate::source::payload::parse_report_date;

const WEEKLY_SUBJECTS: &[&str] = &[
    "週間レポート",
    "ウィークリーレポート",
    "Weekly Progress",
    "進捗をチェック",
    "成果が積み重なって",
];

/// Body patterns needed before an email without a known subject counts as a report.
const MIN_BODY_MATCHES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMetrics {
    pub xp: Option<u32>,
    pub minutes: Option<u32>,
    pub lessons: Option<u32>,
    pub streak: Option<u32>,
}

impl EmailMetrics {
    pub fn is_empty(&self) -> bool {
        self.xp.is_none() && self.minutes.is_none() && self.lessons.is_none() && self.streak.is_none()
    }

    pub fn into_record(self, date: NaiveDate, subject: impl Into<String>) -> ActivityRecord {
        ActivityRecord {
            date,
            subject: subject.into(),
            xp: self.xp.unwrap_or(0),
            minutes: self.minutes.unwrap_or(0),
            lessons: self.lessons.unwrap_or(0),
            streak: self.streak.unwrap_or(0),
        }
    }
}

pub fn is_weekly_report(subject: &str, body: &str) -> bool {
    if WEEKLY_SUBJECTS.iter().any(|s| subject.contains(s)) {
        return true;
    }
    let matches = [
        number_before(body, "XP").is_some(),
        number_before(body, "分").is_some(),
        lesson_count(body).is_some(),
        number_before(body, "日連続").is_some(),
        body.contains("Weekly Progress"),
    ]
    .iter()
    .filter(|m| **m)
    .count();
    matches >= MIN_BODY_MATCHES
}

/// First occurrence of each figure; `None` when the body holds none of them.
pub fn extract_metrics(body: &str) -> Option<EmailMetrics> {
    let metrics = EmailMetrics {
        xp: number_before(body, "XP"),
        minutes: number_before(body, "分"),
        lessons: lesson_count(body),
        streak: number_before(body, "日連続"),
    };
    if metrics.is_empty() { None } else { Some(metrics) }
}

/// Classifies and extracts in one step. `Ok(None)` means the email is not a
/// weekly report or carried no figures.
pub fn parse_report_email(
    subject: &str,
    date_header: &str,
    body: &str,
) -> Result<Option<ActivityRecord>, SourceError> {
    if !is_weekly_report(subject, body) {
        log::debug!("Skipping non-report email: {}", subject);
        return Ok(None);
    }
    let Some(metrics) = extract_metrics(body) else {
        log::warn!("Weekly report without figures: {}", subject);
        return Ok(None);
    };
    let date = parse_report_date(date_header)?;
    Ok(Some(metrics.into_record(date, subject)))
}

/// Replaces tags with spaces and collapses runs of whitespace.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Digits immediately followed by `suffix`, e.g. `1250XP`.
fn number_before(body: &str, suffix: &str) -> Option<u32> {
    body.match_indices(suffix).find_map(|(idx, _)| {
        let prefix = &body[..idx];
        let start = prefix.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        prefix[start..].parse().ok()
    })
}

/// `レッスン 18回`, whitespace between the word and the number optional.
fn lesson_count(body: &str) -> Option<u32> {
    body.match_indices("レッスン").find_map(|(idx, word)| {
        let rest = body[idx + word.len()..].trim_start();
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 || !rest[digits_end..].starts_with('回') {
            return None;
        }
        rest[..digits_end].parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "今週の進捗はいかに？ 今週は 1250XP を獲得し、95分 学習しました。\
                        レッスン 18回 を完了。12日連続 記録更新中！";

    #[test]
    fn extracts_every_figure() {
        let metrics = extract_metrics(BODY).unwrap();
        assert_eq!(
            metrics,
            EmailMetrics {
                xp: Some(1250),
                minutes: Some(95),
                lessons: Some(18),
                streak: Some(12),
            }
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let metrics = extract_metrics("先週 XP なし、今週 300XP、合計 900XP").unwrap();
        assert_eq!(metrics.xp, Some(300));
        assert_eq!(metrics.minutes, None);
    }

    #[test]
    fn nothing_to_extract() {
        assert_eq!(extract_metrics("Hello from the owl"), None);
        assert_eq!(lesson_count("レッスン 回"), None);
        assert_eq!(lesson_count("レッスン数 5回"), None);
    }

    #[test]
    fn lesson_without_space() {
        assert_eq!(lesson_count("レッスン7回"), Some(7));
    }

    #[test]
    fn subject_alone_classifies() {
        assert!(is_weekly_report("あなたの週間レポート", ""));
        assert!(is_weekly_report("Your Weekly Progress", ""));
    }

    #[test]
    fn body_needs_three_patterns() {
        assert!(is_weekly_report("お知らせ", BODY));
        assert!(!is_weekly_report("お知らせ", "100XP を獲得、30分"));
        assert!(is_weekly_report("お知らせ", "100XP を獲得、30分、5日連続"));
    }

    #[test]
    fn strips_tags_and_whitespace() {
        let html = "<html><body><p>今週は<b>1250XP</b></p>\n\n<p>95分</p></body></html>";
        assert_eq!(strip_html(html), "今週は 1250XP 95分");
        assert_eq!(extract_metrics(&strip_html(html)).unwrap().xp, Some(1250));
    }

    #[test]
    fn parses_email_into_record() {
        let record = parse_report_email("週間レポート", "Sat, 30 Aug 2025 05:00:37 +0000", BODY)
            .unwrap()
            .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
        assert_eq!(record.xp, 1250);
        assert_eq!(record.subject, "週間レポート");

        assert!(parse_report_email("Sale!", "2025-08-30", "50% off").unwrap().is_none());
    }

    #[test]
    fn missing_fields_become_zero() {
        let record = EmailMetrics {
            xp: Some(10),
            ..Default::default()
        }
        .into_record(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), "s");
        assert_eq!((record.xp, record.minutes, record.lessons, record.streak), (10, 0, 0, 0));
    }
}
