use chrono::{Datelike, NaiveDate};
use unicode_width::UnicodeWidthStr;

/// Format a minute count as "Xh Ym" or "Ym"
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}

/// Format a date as "M/D" without zero padding, as used on chart axes
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Format a one-decimal value, trimming a trailing ".0"
pub fn format_decimal(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Format a difference with an explicit sign
pub fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_decimal(value))
    } else {
        format_decimal(value)
    }
}

/// Thousands separators for large integer totals
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad to a terminal column width; report subjects are often CJK
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_split_into_hours() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(135), "2h 15m");
        assert_eq!(format_minutes(0), "0m");
    }

    #[test]
    fn short_date_has_no_padding() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(short_date(d), "6/3");
    }

    #[test]
    fn decimals_and_signs() {
        assert_eq!(format_decimal(45.0), "45");
        assert_eq!(format_decimal(6.4), "6.4");
        assert_eq!(format_signed(2.5), "+2.5");
        assert_eq!(format_signed(-30.0), "-30");
        assert_eq!(format_signed(0.0), "0");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1250), "1,250");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn progress_bar_scales() {
        assert_eq!(progress_bar(5, 10, 4), "██░░");
        assert_eq!(progress_bar(1, 0, 3), "░░░");
        assert_eq!(progress_bar(20, 10, 2), "██");
    }

    #[test]
    fn pads_wide_characters_by_column() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("週間", 6), "週間  ");
    }
}
