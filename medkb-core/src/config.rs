//! Client configuration
//!
//! Built once at startup and handed to the transport and the harvest
//! driver. Nothing reads request headers from global state.
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. CLI flags (`--delay-ms`, ...)
//! 2. YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! ```yaml
//! user_agent: "MyStudy/1.0 (contact@example.org)"
//! timeout_seconds: 20
//! pacing_ms: 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{MedkbError, Result};

/// Default identifying client agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "MedicalKnowledgeAPI/2.0 (research; medical-kb-study@example.com)";

/// Minimum request timeout; zero would make every request fail immediately
const MIN_TIMEOUT_SECONDS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the `Accept` header
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Delay after each connector invocation, in milliseconds
    #[serde(default = "default_pacing")]
    pub pacing_ms: u64,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept() -> String {
    "application/json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_pacing() -> u64 {
    800
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            timeout_seconds: default_timeout(),
            pacing_ms: default_pacing(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MedkbError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(
            "Loaded client config from {}: timeout={}s, pacing={}ms",
            path.display(),
            config.timeout_seconds,
            config.pacing_ms
        );
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Request timeout, clamped to at least one second
    pub fn timeout(&self) -> Duration {
        if self.timeout_seconds < MIN_TIMEOUT_SECONDS {
            warn!(
                "Configured timeout_seconds={} is too low; using minimum of {} seconds",
                self.timeout_seconds, MIN_TIMEOUT_SECONDS
            );
            return Duration::from_secs(MIN_TIMEOUT_SECONDS);
        }
        Duration::from_secs(self.timeout_seconds)
    }

    /// Delay inserted after each connector invocation
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}
