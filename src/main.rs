use anyhow::{Context, Result};
use clap::Parser;

use studylens::cli::args::{Cli, Commands};
use studylens::cli::handlers;
use studylens::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };
    let mut config = AppConfig::load_from(&config_path).context("Loading config")?;

    if let Some(granularity) = cli.granularity {
        config.metrics.granularity = granularity;
    }
    let engine = config.engine();

    match cli.command {
        Commands::Summary { file } => {
            let series = handlers::load(file, &config)?;
            handlers::handle_summary(&engine, &series)?;
        }
        Commands::Compare { file } => {
            let series = handlers::load(file, &config)?;
            handlers::handle_compare(&engine, &series)?;
        }
        Commands::Calendar { file, today } => {
            let today = handlers::parse_today(today.as_deref())?;
            let series = handlers::load(file, &config)?;
            handlers::handle_calendar(&engine, &series, today)?;
        }
        Commands::Trend { file } => {
            let series = handlers::load(file, &config)?;
            handlers::handle_trend(&engine, &series)?;
        }
        Commands::Export {
            file,
            today,
            pretty,
        } => {
            let today = handlers::parse_today(today.as_deref())?;
            let series = handlers::load(file, &config)?;
            handlers::handle_export(&engine, &series, today, pretty)?;
        }
        Commands::Email {
            file,
            subject,
            date,
        } => {
            handlers::handle_email(&file, &subject, &date)?;
        }
        Commands::Config => {
            handlers::handle_config(&config, &config_path)?;
        }
    }

    Ok(())
}
