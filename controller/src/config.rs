//! runtime configuration
//!
//! read from an optional inline json block in the host page. every field
//! has a default so a missing block, or a partial one, still yields a
//! working client talking to the same origin.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// default generation endpoint, relative to api_base
pub const GENERATE_PATH: &str = "/api/generate";
/// default script catalog endpoint, relative to api_base
pub const SCRIPTS_PATH: &str = "/api/scripts";

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// origin of the generation service, empty for same-origin
    pub api_base: String,
    pub generate_path: String,
    pub scripts_path: String,
    /// countdown refresh period
    pub tick_interval_ms: u64,
    /// how long a notification stays on screen
    pub notification_ttl_ms: u64,
    /// tracing filter directive, e.g. "info" or "script_url_controller=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            generate_path: GENERATE_PATH.to_string(),
            scripts_path: SCRIPTS_PATH.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// parse and validate an inline config block
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if !self.generate_path.starts_with('/') || !self.scripts_path.starts_with('/') {
            return Err(ConfigError::Invalid("endpoint paths must start with '/'".into()));
        }
        Ok(())
    }

    pub fn generate_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), self.generate_path)
    }

    pub fn scripts_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), self.scripts_path)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

// ==============================================================================
// tests
// ==============================================================================
