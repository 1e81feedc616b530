//! Configuration management

use crate::error::{ErrorContext, JobBoardError, JobBoardResult};
use crate::{config_error, not_found_error};
use crate::logging::LoggingConfig;
use crate::storage::is_valid_key;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobBoardConfig {
    pub session: SessionConfig,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key the session record is persisted under
    pub storage_key: String,
    /// Organization given to recruiters who register without one
    pub default_organization: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "user".to_string(),
            default_organization: "Your Company".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Currency symbol used when a listing form leaves it blank
    pub default_currency: String,
    /// Seed the catalog with demonstration listings at startup
    pub seed_demo_listings: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_currency: "$".to_string(),
            seed_demo_listings: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jobboard");

        Self {
            backend: StorageBackend::Memory,
            data_dir,
        }
    }
}

impl JobBoardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> JobBoardResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(not_found_error!(path.display(), "config"));
        }

        let content = std::fs::read_to_string(path).map_err(|e| JobBoardError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: JobBoardConfig = toml::from_str(&content).map_err(|e| JobBoardError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> JobBoardResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> JobBoardResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| JobBoardError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| JobBoardError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> JobBoardResult<()> {
        if !is_valid_key(&self.session.storage_key) {
            return Err(JobBoardError::Config {
                message: format!(
                    "Session storage key {:?} must be non-empty and use only [A-Za-z0-9_-]",
                    self.session.storage_key
                ),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set session.storage_key to a simple name such as \"user\""),
            });
        }

        if self.catalog.default_currency.trim().is_empty() {
            return Err(config_error!(
                "Catalog default_currency must not be empty",
                "config"
            ));
        }

        if self.storage.backend == StorageBackend::File
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(config_error!("File storage requires a data_dir", "config"));
        }

        Ok(())
    }
}
