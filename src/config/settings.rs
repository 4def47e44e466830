use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::MetricsEngine;
use crate::models::{IntensityThresholds, PeriodGranularity};

fn default_granularity() -> PeriodGranularity {
    PeriodGranularity::Weekly
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Length of one report period. The weekly email digest is "weekly".
    #[serde(default = "default_granularity")]
    pub granularity: PeriodGranularity,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            granularity: default_granularity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Saved report payload used when no file is given on the command line
    #[serde(default)]
    pub reports_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub calendar: IntensityThresholds,
    #[serde(default)]
    pub source: SourceConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "studylens")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults; a present but invalid file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config
            .calendar
            .validate()
            .with_context(|| format!("Invalid [calendar] thresholds in {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn engine(&self) -> MetricsEngine {
        MetricsEngine::new(self.metrics.granularity, self.calendar)
    }
}
