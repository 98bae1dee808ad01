//! Configuration settings structures for notify-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "notify-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_delivery_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs/notify.log".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Notification Configuration
// ============================================================================

/// Notification routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Push target addresses, separated by whitespace or commas
    #[serde(default)]
    pub servers: String,

    /// Notify when a download completed successfully
    #[serde(default = "default_true")]
    pub on_success: bool,

    /// Notify when a download failed
    #[serde(default = "default_true")]
    pub on_failure: bool,

    /// Attach a status image where the backend supports one
    #[serde(default = "default_true")]
    pub include_image: bool,

    /// Bound on concurrent deliveries
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-delivery timeout in seconds
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_seconds: u64,
}

impl NotifyConfig {
    /// Validates the notification configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::validation(
                "notify.concurrency",
                "Concurrency must be at least 1",
            ));
        }

        if self.delivery_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "notify.delivery_timeout_seconds",
                "Delivery timeout must be at least 1 second",
            ));
        }

        Ok(())
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            servers: String::new(),
            on_success: true,
            on_failure: true,
            include_image: true,
            concurrency: default_concurrency(),
            delivery_timeout_seconds: default_delivery_timeout(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig {
            enabled: self.enabled,
            colored: self.colored,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// One of: full, compact, json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
        }
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        let config = FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        };
        config
            .validate()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Parse the format string into LogFormat enum
    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

/// Logger settings as they appear in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = self.console.into_console_config();
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root settings structure combining all configuration sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Notification routing configuration
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notify.validate()?;
        self.logger.clone().into_logger_config()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut settings = Settings::default();
        settings.notify.concurrency = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut settings = Settings::default();
        settings.notify.delivery_timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let mut settings = Settings::default();
        settings.logger.file.format = "yaml".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [notify]
            servers = "growl://host, json://other:8080"
            on_success = true
            on_failure = false
            concurrency = 8

            [logger]
            level = "debug"

            [logger.file]
            enabled = true
            path = "logs/test.log"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.notify.servers, "growl://host, json://other:8080");
        assert!(!settings.notify.on_failure);
        assert_eq!(settings.notify.concurrency, 8);
        assert_eq!(settings.logger.level, "debug");
        assert!(settings.logger.file.enabled);
        assert_eq!(settings.logger.file.format, "json");
        assert!(settings.validate().is_ok());
    }
}
