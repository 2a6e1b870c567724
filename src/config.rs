//! Configuration for the weather panel
//!
//! Two layers live here:
//! - [`PanelConfig`]: the per-instance card configuration handed over by the
//!   dashboard host. Validated once at construction and immutable afterwards.
//! - [`PanelSettings`]: process-level settings (logging, icon defaults) loaded
//!   from an optional TOML file plus `WEATHER_PANEL__*` environment overrides.

use crate::PanelError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Icon set used when neither the card nor the settings override it.
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/bramkragten/custom-ui@master/weather-card/icons/animated/";

/// How forecast periods are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    #[default]
    Daily,
    Hourly,
}

impl ForecastMode {
    /// Anything other than `hourly` falls back to daily labels.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "hourly" {
            Self::Hourly
        } else {
            Self::Daily
        }
    }
}

/// Card configuration exactly as the host's property bag carries it
#[derive(Debug, Clone, Default, Deserialize)]
struct RawPanelConfig {
    entity: Option<String>,
    name: Option<String>,
    mode: Option<String>,
    icons: Option<String>,
}

/// Validated card configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPanelConfig")]
pub struct PanelConfig {
    entity: String,
    name: Option<String>,
    mode: ForecastMode,
    icons: Option<String>,
}

impl TryFrom<RawPanelConfig> for PanelConfig {
    type Error = PanelError;

    fn try_from(raw: RawPanelConfig) -> std::result::Result<Self, Self::Error> {
        let entity = non_empty(raw.entity)
            .ok_or_else(|| PanelError::config("Please define a weather entity"))?;

        Ok(Self {
            entity,
            name: non_empty(raw.name),
            mode: raw
                .mode
                .as_deref()
                .map(ForecastMode::from_name)
                .unwrap_or_default(),
            icons: non_empty(raw.icons),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PanelConfig {
    /// Build a configuration for the given weather entity
    pub fn new<S: Into<String>>(entity: S) -> crate::Result<Self> {
        RawPanelConfig {
            entity: Some(entity.into()),
            ..RawPanelConfig::default()
        }
        .try_into()
    }

    /// Parse the host's JSON property bag
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        let raw: RawPanelConfig = serde_json::from_value(value)?;
        raw.try_into()
    }

    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = non_empty(Some(name.into()));
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ForecastMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_icons<S: Into<String>>(mut self, icons: S) -> Self {
        self.icons = non_empty(Some(icons.into()));
        self
    }

    /// Identifier of the watched weather entity
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn mode(&self) -> ForecastMode {
        self.mode
    }

    /// Card-level icon base override
    #[must_use]
    pub fn icons(&self) -> Option<&str> {
        self.icons.as_deref()
    }
}

/// Root settings structure for the weather panel process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Icon source defaults
    #[serde(default)]
    pub icons: IconsConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Icon source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Base URL or path icons are resolved against
    #[serde(default = "default_icon_base_url")]
    pub base_url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: default_icon_base_url(),
        }
    }
}

impl PanelSettings {
    /// Load settings from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load settings from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("weather-panel.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHER_PANEL__LOGGING__LEVEL=debug and friends
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_PANEL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build settings")?;

        let mut settings: PanelSettings = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize settings")?;

        settings.apply_defaults();
        settings.validate()?;

        Ok(settings)
    }

    /// Get the default settings file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-panel").join("config.toml"))
    }

    /// Replace blank values with their defaults
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.icons.base_url.trim().is_empty() {
            self.icons.base_url = default_icon_base_url();
        }
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PanelError::settings(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PanelError::settings(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.icons.base_url.chars().any(char::is_whitespace) {
            return Err(
                PanelError::settings("Icon base URL must not contain whitespace").into(),
            );
        }

        Ok(())
    }
}
