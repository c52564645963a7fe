//! Connection settings for the remote secrets API.
//!
//! Load order: defaults, then an optional JSON file, then `DATABRICKS_*`
//! environment variables. Each layer overrides the previous.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, HOST_ENV, TIMEOUT_ENV, TOKEN_ENV};
use crate::error::{AclError, Result};

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Workspace base URL, e.g. `https://example.cloud.databricks.com`.
    #[serde(default)]
    pub host: String,
    /// Personal access token sent as a bearer credential.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        debug!("loaded client config from {}", path.display());
        Ok(config)
    }

    /// Builds a config from process environment variables alone.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.merge_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields from the process environment.
    pub fn merge_env(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Overrides fields from `lookup`, which stands in for the environment.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = token;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = raw.trim().parse().map_err(|_| AclError::Config {
                reason: format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.host.starts_with("https://") && !self.host.starts_with("http://") {
            return Err(AclError::Config {
                reason: format!("host must start with http:// or https://, got '{}'", self.host),
            });
        }
        if self.token.trim().is_empty() {
            return Err(AclError::Config {
                reason: "token is empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(AclError::Config {
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an API path onto the host without doubling slashes.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
