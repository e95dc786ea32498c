//! Config management use case

use crate::error::{NotepubError, Result};
use crate::infrastructure::{Config, FileSystemRepository, NoteRepository};

/// Service for managing store configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "publish_base_url" => Ok(config.publish_base_url),
            "log_level" => Ok(config.log_level),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(NotepubError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: publish_base_url, log_level, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "publish_base_url" => {
                if value.trim().is_empty() {
                    return Err(NotepubError::Config(
                        "publish_base_url cannot be empty".to_string(),
                    ));
                }
                config.publish_base_url = value.to_string();
            }
            "log_level" => {
                config.log_level = value.to_string();
            }
            "created" => {
                return Err(NotepubError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(NotepubError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: publish_base_url, log_level",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
