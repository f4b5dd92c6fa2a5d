//! CLI configuration

use crate::error::{CliError, CliResult};
use mcprofile::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration file contents. Unset keys fall back to library defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Account API base URL
    pub api_base: Option<String>,

    /// Session server base URL
    pub session_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,

    /// User agent override
    pub user_agent: Option<String>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            if config.timeout_seconds == Some(0) {
                return Err(CliError::Config("timeout_seconds must be at least 1".into()));
            }
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("mcprofile").join("config.toml"))
    }

    /// Layer this file over the library defaults
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(session_base) = &self.session_base {
            config.session_base = session_base.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}
