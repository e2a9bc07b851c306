//! Delivery settings, loaded from TOML.
//!
//! ```toml
//! max_bundle_size = 2000
//! max_commit_attempts = 64
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_BUNDLE_SIZE: usize = 2000;
pub const DEFAULT_MAX_COMMIT_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Upper bound on messages per bundle. Messages beyond it stay unbundled,
    /// in order, for the next bundle.
    pub max_bundle_size: usize,
    /// Attempts at an optimistic queue commit before the conflict is surfaced.
    pub max_commit_attempts: u32,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        DeliveryConfig {
            max_bundle_size: DEFAULT_MAX_BUNDLE_SIZE,
            max_commit_attempts: DEFAULT_MAX_COMMIT_ATTEMPTS,
        }
    }
}

impl DeliveryConfig {
    pub fn with_max_bundle_size(mut self, max_bundle_size: usize) -> Self {
        self.max_bundle_size = max_bundle_size;
        self
    }

    pub fn with_max_commit_attempts(mut self, max_commit_attempts: u32) -> Self {
        self.max_commit_attempts = max_commit_attempts;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DeliveryConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bundle_size == 0 {
            return Err(ConfigError::Invalid(
                "max_bundle_size must be at least 1".into(),
            ));
        }
        if self.max_commit_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_commit_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
