use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::PeriodGranularity;

#[derive(Parser, Debug)]
#[command(name = "studylens", version, author, about = "Dashboard metrics for weekly learning-activity reports")]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured period length (daily or weekly)
    #[arg(long, global = true)]
    pub granularity: Option<PeriodGranularity>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Totals, streaks and averages
    Summary {
        /// Report payload (JSON); defaults to source.reports_path
        file: Option<PathBuf>,
    },
    /// Latest period against the one before it
    Compare {
        file: Option<PathBuf>,
    },
    /// Yearly activity heatmap
    Calendar {
        file: Option<PathBuf>,
        /// Reference day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// XP and minutes per period, oldest first
    Trend {
        file: Option<PathBuf>,
    },
    /// Print every derived view as JSON
    Export {
        file: Option<PathBuf>,
        #[arg(long)]
        today: Option<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Extract a record from a weekly report email body
    Email {
        /// File holding the email body (text or HTML)
        file: PathBuf,
        /// Email subject line
        #[arg(long, default_value = "")]
        subject: String,
        /// Email Date header or YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Show the effective configuration
    Config,
}
