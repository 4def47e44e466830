use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::engine::MetricsEngine;
use crate::models::{CalendarGrid, Intensity, Metric, ReportSeries, Trend};
use crate::source::{self, email, parse_report_date};
use crate::utils::format::{
    format_decimal, format_minutes, format_signed, format_thousands, pad_display, progress_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;16;185;129m";
const RESET: &str = "\x1b[0m";

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// ─── Input ───────────────────────────────────────────────────────────────────

/// The explicit file wins, then `source.reports_path`.
pub fn resolve_input(file: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    file.or_else(|| config.source.reports_path.clone()).ok_or_else(|| {
        anyhow!("No report file given and source.reports_path is not configured")
    })
}

pub fn load(file: Option<PathBuf>, config: &AppConfig) -> Result<ReportSeries> {
    let path = resolve_input(file, config)?;
    source::load_series(&path)
}

pub fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Bad --today '{}', expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

pub fn handle_summary(engine: &MetricsEngine, series: &ReportSeries) -> Result<()> {
    let stats = engine.aggregate(series);

    println!();
    println_colored!(
        TEAL,
        "  Summary — {} {} period(s)",
        stats.periods,
        engine.granularity()
    );
    println!();

    if stats.is_empty() {
        println_colored!(DIM, "  No reports yet");
        println!();
        return Ok(());
    }

    println_colored!(BOLD, "  Total XP:          {}", format_thousands(stats.total_xp));
    println_colored!(
        BOLD,
        "  Study time:        {} ({} h)",
        format_minutes(stats.total_minutes),
        format_decimal(stats.total_hours)
    );
    println_colored!(BOLD, "  Lessons:           {}", stats.total_lessons);
    println_colored!(
        AMBER,
        "  Streak:            {} days current  |  {} days best",
        stats.current_streak,
        stats.best_streak
    );
    println!();
    println!("  Per day ({} days)", stats.total_days);
    println!("    minutes          {}", format_decimal(stats.avg_minutes_per_day));
    println!("    lessons          {}", format_decimal(stats.avg_lessons_per_day));
    println!("    XP               {}", format_decimal(stats.avg_xp_per_day));
    println!("  Per week");
    println!("    minutes          {}", format_decimal(stats.avg_minutes_per_week));
    println!("    XP               {}", format_decimal(stats.avg_xp_per_week));
    println!("  Per lesson");
    println!("    minutes          {}", format_decimal(stats.avg_minutes_per_lesson));
    println!();
    Ok(())
}

// ─── Compare ─────────────────────────────────────────────────────────────────

pub fn handle_compare(engine: &MetricsEngine, series: &ReportSeries) -> Result<()> {
    let comparisons = engine.compare(series);

    println!();
    match series.current_and_previous() {
        Some((current, previous)) => println_colored!(
            TEAL,
            "  {} vs {}",
            current.date.format("%Y-%m-%d"),
            previous.date.format("%Y-%m-%d")
        ),
        None => println_colored!(DIM, "  Need two reports to compare; showing neutral values"),
    }
    println!();

    for metric in Metric::all() {
        let Some(cmp) = comparisons.get(&metric) else {
            continue;
        };
        let color = match cmp.trend {
            Trend::Up => GREEN,
            Trend::Down => RED,
            Trend::Same => DIM,
        };
        println!(
            "  {:<14} {:>8} {:>8}   {}{} {:>7} ({:+}%){}",
            metric.display_name(),
            format_decimal(cmp.current),
            format_decimal(cmp.previous),
            color,
            cmp.trend.symbol(),
            format_signed(cmp.diff),
            cmp.percentage,
            RESET
        );
    }
    println!();
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(
    engine: &MetricsEngine,
    series: &ReportSeries,
    today: NaiveDate,
) -> Result<()> {
    let grid = engine.calendar(series, today);
    let thresholds = engine.thresholds();

    println!();
    println_colored!(
        TEAL,
        "  Activity — {} active day(s) in the year to {}",
        grid.active_days(),
        today.format("%Y-%m-%d")
    );
    println!();
    println!("      {}", month_header(&grid));
    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        let mut line = format!("  {} ", label);
        for week in &grid.weeks {
            let cell = &week.days[row];
            if cell.is_future && cell.intensity == Intensity::None {
                line.push(' ');
            } else {
                line.push_str(&intensity_glyph(cell.intensity));
            }
        }
        println!("{}", line);
    }
    println!();
    println!(
        "      less {} {} {} {} more   {}(low ≥{}m, medium ≥{}m, high ≥{}m){}",
        intensity_glyph(Intensity::None),
        intensity_glyph(Intensity::Low),
        intensity_glyph(Intensity::Medium),
        intensity_glyph(Intensity::High),
        DIM,
        thresholds.low,
        thresholds.medium,
        thresholds.high,
        RESET
    );
    println!();
    Ok(())
}

fn intensity_glyph(intensity: Intensity) -> String {
    match intensity {
        Intensity::None => format!("{}·{}", DIM, RESET),
        Intensity::Low => format!("{}░{}", GREEN, RESET),
        Intensity::Medium => format!("{}▒{}", GREEN, RESET),
        Intensity::High => format!("{}█{}", GREEN, RESET),
    }
}

/// Three-letter month names over the week in which each month starts.
fn month_header(grid: &CalendarGrid) -> String {
    let mut header: Vec<char> = vec![' '; grid.weeks.len()];
    let mut last_month = None;
    let mut free_from = 0;
    for (col, week) in grid.weeks.iter().enumerate() {
        let month_start = week
            .days
            .iter()
            .find(|c| c.date.day() == 1)
            .map(|c| c.date)
            .unwrap_or_else(|| week.first_day());
        let key = (month_start.year(), month_start.month());
        if last_month == Some(key) {
            continue;
        }
        last_month = Some(key);
        let name = month_start.format("%b").to_string();
        if col >= free_from && col + name.len() <= header.len() {
            for (i, ch) in name.chars().enumerate() {
                header[col + i] = ch;
            }
            free_from = col + name.len() + 1;
        }
    }
    header.into_iter().collect()
}

// ─── Trend ───────────────────────────────────────────────────────────────────

pub fn handle_trend(engine: &MetricsEngine, series: &ReportSeries) -> Result<()> {
    let points = engine.trend(series);

    println!();
    println_colored!(TEAL, "  XP and minutes per {} period", engine.granularity());
    println!();
    if points.is_empty() {
        println_colored!(DIM, "  No reports yet");
        println!();
        return Ok(());
    }

    let max_xp = points.iter().map(|p| p.xp).max().unwrap_or(0);
    let max_minutes = points.iter().map(|p| p.minutes).max().unwrap_or(0);
    for p in &points {
        println!(
            "  {} {}{}{} {:>6} XP   {}{}{} {:>5} min",
            pad_display(&p.label, 6),
            GREEN,
            progress_bar(p.xp, max_xp, 20),
            RESET,
            format_thousands(p.xp as u64),
            AMBER,
            progress_bar(p.minutes, max_minutes, 12),
            RESET,
            p.minutes
        );
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(
    engine: &MetricsEngine,
    series: &ReportSeries,
    today: NaiveDate,
    pretty: bool,
) -> Result<()> {
    let snapshot = engine.snapshot(series, today);
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .context("Serializing dashboard snapshot")?;
    println!("{}", json);
    Ok(())
}

// ─── Email ───────────────────────────────────────────────────────────────────

pub fn handle_email(path: &Path, subject: &str, date: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    let body = if raw.trim_start().starts_with('<') {
        email::strip_html(&raw)
    } else {
        raw
    };

    // Checked up front so a typo is reported even for non-report emails.
    parse_report_date(date).with_context(|| format!("Bad --date '{}'", date))?;

    match email::parse_report_email(subject, date, &body)? {
        Some(record) => {
            let json =
                serde_json::to_string_pretty(&record).context("Serializing extracted record")?;
            println!("{}", json);
        }
        None => {
            println_colored!(AMBER, "  Not a weekly report (or no figures found)");
        }
    }
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, path: &Path) -> Result<()> {
    let exists = path.exists();
    println!("# {:?}{}", path, if exists { "" } else { " (not found, defaults)" });
    let content = toml::to_string_pretty(config).context("Serializing config")?;
    print!("{}", content);
    Ok(())
}
