//! Configuration management

use crate::error::{ErrorContext, TrackError, TrackResult};
use crate::logging::LoggingConfig;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, read from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Where the session record lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding persisted key-value entries (`~` is expanded)
    pub data_dir: String,
    /// Key under which the signed-in user is stored
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.studenttrack/data".to_string(),
            session_key: "user".to_string(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` replaced by the home directory
    pub fn resolved_data_dir(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(&self.data_dir),
            },
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Account policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Role assigned to accounts created through sign-up
    pub signup_role: Role,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signup_role: Role::Admin,
        }
    }
}

impl TrackConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TrackResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| TrackError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_metadata("path", &shown)
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: TrackConfig = toml::from_str(&content).map_err(|e| TrackError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_metadata("path", &shown)
                .with_suggestion("Check TOML syntax in config file")
                .with_suggestion("Run 'studenttrack config --init' to replace it with defaults"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TrackResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| TrackError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| TrackError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> TrackResult<()> {
        if self.storage.session_key.trim().is_empty() {
            return Err(crate::validation_error!(
                "Session key must not be empty",
                "storage.session_key",
                "config"
            ));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(crate::validation_error!(
                "Data directory must not be empty",
                "storage.data_dir",
                "config"
            ));
        }

        Ok(())
    }
}
