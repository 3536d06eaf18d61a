// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::locale::{InvariantLocale, LocaleProvider, StaticLocale};
use crate::model::{DisplayMode, TimePattern};
use crate::storage::LocalStorage;
use anyhow::{Error, Result, anyhow};
use chrono::NaiveDate;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX)
}

fn default_time_format() -> TimePattern {
    TimePattern::default()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_min_date")]
    pub min_date: NaiveDate,
    #[serde(default = "default_max_date")]
    pub max_date: NaiveDate,
    #[serde(default)]
    pub display_mode: DisplayMode,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            min_date: default_min_date(),
            max_date: default_max_date(),
            display_mode: DisplayMode::default(),
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_date > self.max_date {
            return Err(anyhow!(
                "Invalid calendar bounds: min_date {} is after max_date {}",
                self.min_date,
                self.max_date
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePickerConfig {
    /// Checked against the token grammar while deserializing.
    #[serde(default = "default_time_format")]
    pub format: TimePattern,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            format: default_time_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub time_picker: TimePickerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<StaticLocale>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            log_level: default_log_level(),
            calendar: CalendarConfig::default(),
            time_picker: TimePickerConfig::default(),
            locale: None,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading, parsing or validation fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow!("Config file not found"));
        }

        let contents = LocalStorage::read_locked(&path).map_err(|e| {
            anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config = Self::from_toml_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.calendar.validate()?;
        self.log_level_filter()?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow!("Invalid log_level '{}'", self.log_level))
    }

    /// The configured `[locale]` tables, or English names when absent.
    pub fn locale_provider(&self) -> Box<dyn LocaleProvider> {
        match &self.locale {
            Some(locale) => Box::new(locale.clone()),
            None => Box::new(InvariantLocale),
        }
    }

    /// Detects a missing config file, either by our own message or by an IO
    /// NotFound anywhere in the error chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        self.validate()?;
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
