use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use almanack_engine::ClientSettings;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "almanack.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings read from `almanack.ron`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub cache_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            cache_dir: PathBuf::from(".almanack-cache"),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config file. An explicit path must exist; the default
    /// path falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if explicit.is_none() && err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
