//! Configuration management for SpaceBook
//!
//! Defaults, overridable from a TOML file or from `SPACEBOOK_*` environment
//! variables, validated before use.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::logging::{LogConfig, LogLevel};

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where snapshots and reports go by default
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Snapshot and export locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Default snapshot file offered by the load/save prompts
    pub backup_file: PathBuf,

    /// Default report file offered by the export prompt
    pub export_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include timestamps
    pub with_timestamp: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backup_file: PathBuf::from("backup.json"),
            export_file: PathBuf::from("prenotazioni.txt"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            with_timestamp: true,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Build the runtime logging configuration
    pub fn to_log_config(&self) -> Result<LogConfig, ConfigError> {
        let level = LogLevel::parse(&self.level).ok_or_else(|| ConfigError::InvalidValue {
            var: "logging.level",
            reason: format!("unknown level '{}'", self.level),
        })?;

        Ok(LogConfig::new(level)
            .json_format(self.json_format)
            .with_timestamp(self.with_timestamp)
            .with_target(self.with_target))
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: SPACEBOOK_<SECTION>_<KEY>
    /// Example: SPACEBOOK_STORE_BACKUP_FILE=/var/lib/spacebook/backup.json
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&contents)?;

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("SPACEBOOK_STORE_BACKUP_FILE") {
            self.store.backup_file = PathBuf::from(path);
        }
        if let Ok(path) = env::var("SPACEBOOK_STORE_EXPORT_FILE") {
            self.store.export_file = PathBuf::from(path);
        }
        if let Ok(level) = env::var("SPACEBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("SPACEBOOK_LOG_JSON") {
            self.logging.json_format = json.parse().map_err(|e| ConfigError::InvalidValue {
                var: "SPACEBOOK_LOG_JSON",
                reason: format!("{}", e),
            })?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backup_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "backup_file must not be empty".to_string(),
            ));
        }

        if self.store.export_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "export_file must not be empty".to_string(),
            ));
        }

        if LogLevel::parse(&self.logging.level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.backup_file, PathBuf::from("backup.json"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.store.backup_file = PathBuf::new();
        assert!(config.validate().is_err());

        config = Config::default();
        config.store.export_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        let mut config = Config::default();

        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
        assert!(config.logging.to_log_config().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.to_log_config().unwrap().level, LogLevel::Debug);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spacebook.toml");

        let mut config = Config::default();
        config.store.backup_file = dir.path().join("state.json");
        config.logging.level = "info".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.store.backup_file, config.store.backup_file);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[logging]\nlevel = \"error\"\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.logging.level, "error");
        assert_eq!(loaded.store, StoreConfig::default());
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[store\nbackup_file = ").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
