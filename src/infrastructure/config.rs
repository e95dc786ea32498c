//! Configuration management

use crate::error::{NotepubError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const STORE_DIR: &str = ".notepub";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PUBLISH_BASE_URL: &str = "https://notes.example.com/p";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for public links when a confirmation carries no URL
    #[serde(default = "default_publish_base_url")]
    pub publish_base_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub created: DateTime<Utc>,
}

fn default_publish_base_url() -> String {
    DEFAULT_PUBLISH_BASE_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            publish_base_url: default_publish_base_url(),
            log_level: default_log_level(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .notepub/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(STORE_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotepubError::NotNotepubDirectory(path.to_path_buf())
            } else {
                NotepubError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| NotepubError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .notepub/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let store_dir = path.join(STORE_DIR);
        let config_path = store_dir.join(CONFIG_FILE);

        if !store_dir.exists() {
            fs::create_dir(&store_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| NotepubError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Public link for a note published under this store
    pub fn public_url_for(&self, identifier: &str) -> String {
        format!("{}/{}", self.publish_base_url.trim_end_matches('/'), identifier)
    }

    /// Log filter directive, with NOTEPUB_LOG taking precedence
    pub fn get_log_filter(&self) -> String {
        std::env::var("NOTEPUB_LOG").unwrap_or_else(|_| self.log_level.clone())
    }
}
