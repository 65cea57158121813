//! Configuration for junos-resources
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/junos-resources/config.toml)
//! - User configuration (~/.config/junos-resources/config.toml)
//! - Project configuration (./junos-resources.toml)
//! - Environment variables (`JUNOS_RESOURCES_*`)

use crate::error::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an extra configuration file.
pub const CONFIG_ENV: &str = "JUNOS_RESOURCES_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device session settings
    pub session: SessionSettings,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// How the provider drives a configuration session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Extra lock attempts after the first one is denied
    pub lock_retries: u32,

    /// Pause between lock attempts, in milliseconds
    pub lock_retry_delay_ms: u64,

    /// Text prepended to every commit comment
    pub commit_comment_prefix: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lock_retries: 3,
            lock_retry_delay_ms: 1000,
            commit_comment_prefix: String::new(),
        }
    }
}

impl SessionSettings {
    /// Commit comment for `action` (`create`, `update`, `delete`) on `resource`.
    pub fn commit_comment(&self, action: &str, resource: &str) -> String {
        if self.commit_comment_prefix.is_empty() {
            format!("{} resource {}", action, resource)
        } else {
            format!(
                "{} {} resource {}",
                self.commit_comment_prefix, action, resource
            )
        }
    }
}

/// Output format of the command line tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain `set` statements or a summary line
    #[default]
    Text,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(Error::InvalidConfig {
                key: "output.format".to_string(),
                message: format!("unknown format '{}'", other),
            }),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::FileNotFound(path.to_path_buf()));
            }
        }

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&Path>) -> Vec<PathBuf> {
        // Explicit path takes priority
        if let Some(path) = explicit_path {
            return vec![path.to_path_buf()];
        }

        let mut paths = vec![PathBuf::from("/etc/junos-resources/config.toml")];

        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("junos-resources").join("config.toml"));
        }

        paths.push(PathBuf::from("junos-resources.toml"));

        if let Ok(env_config) = std::env::var(CONFIG_ENV) {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    /// Load from a specific file, on top of the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        // Determine format based on extension
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; values differing from the
    /// defaults win.
    fn merge(&self, other: Config) -> Config {
        let defaults = Config::default();
        Config {
            session: SessionSettings {
                lock_retries: if other.session.lock_retries != defaults.session.lock_retries {
                    other.session.lock_retries
                } else {
                    self.session.lock_retries
                },
                lock_retry_delay_ms: if other.session.lock_retry_delay_ms
                    != defaults.session.lock_retry_delay_ms
                {
                    other.session.lock_retry_delay_ms
                } else {
                    self.session.lock_retry_delay_ms
                },
                commit_comment_prefix: if other.session.commit_comment_prefix.is_empty() {
                    self.session.commit_comment_prefix.clone()
                } else {
                    other.session.commit_comment_prefix
                },
            },
            output: OutputConfig {
                format: if other.output.format != defaults.output.format {
                    other.output.format
                } else {
                    self.output.format
                },
            },
            logging: LoggingConfig {
                level: if other.logging.level != defaults.logging.level {
                    other.logging.level
                } else {
                    self.logging.level.clone()
                },
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // JUNOS_RESOURCES_LOCK_RETRIES
        if let Ok(retries) = std::env::var("JUNOS_RESOURCES_LOCK_RETRIES") {
            self.session.lock_retries = retries.parse().map_err(|_| Error::InvalidConfig {
                key: "session.lock_retries".to_string(),
                message: format!("'{}' is not a number", retries),
            })?;
        }

        // JUNOS_RESOURCES_LOCK_RETRY_DELAY_MS
        if let Ok(delay) = std::env::var("JUNOS_RESOURCES_LOCK_RETRY_DELAY_MS") {
            self.session.lock_retry_delay_ms = delay.parse().map_err(|_| Error::InvalidConfig {
                key: "session.lock_retry_delay_ms".to_string(),
                message: format!("'{}' is not a number", delay),
            })?;
        }

        // JUNOS_RESOURCES_COMMIT_COMMENT_PREFIX
        if let Ok(prefix) = std::env::var("JUNOS_RESOURCES_COMMIT_COMMENT_PREFIX") {
            self.session.commit_comment_prefix = prefix;
        }

        // JUNOS_RESOURCES_OUTPUT
        if let Ok(format) = std::env::var("JUNOS_RESOURCES_OUTPUT") {
            self.output.format = format.parse()?;
        }

        // JUNOS_RESOURCES_LOG_LEVEL
        if let Ok(level) = std::env::var("JUNOS_RESOURCES_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }
}
