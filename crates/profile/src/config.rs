//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

pub const DEFAULT_API_BASE: &str = "https://api.mojang.com";
pub const DEFAULT_SESSION_BASE: &str = "https://sessionserver.mojang.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings for [`HttpTransport`](crate::HttpTransport) and
/// [`ProfileClient`](crate::ProfileClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the account API (name lookups, history, batch lookups)
    pub api_base: String,

    /// Base URL of the session server (textures)
    pub session_base: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            session_base: DEFAULT_SESSION_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("mcprofile/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> ProfileResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ProfileError::parse("client configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no request could succeed with.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ProfileError::parse(
                "client configuration",
                "timeout_seconds must be at least 1",
            ));
        }
        Ok(())
    }

    /// Point both services at one base URL. Handy for local mocks.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.api_base = base.clone();
        self.session_base = base;
        self
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
