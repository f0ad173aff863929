//! Session configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{RequestedMetadataGroup, StrictMetadataPreference};

/// Errors that can occur while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A batch size setting is below 1
    #[error("Invalid {setting}: {value} (must be at least 1)")]
    InvalidBatchSize { setting: &'static str, value: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::InvalidBatchSize { setting, value } => format!(
                "Invalid {setting}: {value}\n\nHint: batch sizes must be positive integers."
            ),
            _ => self.to_string(),
        }
    }
}

/// Settings of one client session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Maximum identifiers per metadata call
    pub metadata_batch_size: usize,

    /// Maximum identifiers per call that also transfers file content
    pub blob_batch_size: usize,

    /// Group used to synthesize default requested fields
    pub default_requested_metadata: RequestedMetadataGroup,

    /// Handling of fields the schema disallows for an action
    pub strict_metadata_preference: StrictMetadataPreference,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            metadata_batch_size: 999,
            blob_batch_size: 10,
            default_requested_metadata: RequestedMetadataGroup::Basic,
            strict_metadata_preference: StrictMetadataPreference::Continue,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                setting: "metadataBatchSize",
                value: self.metadata_batch_size,
            });
        }
        if self.blob_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                setting: "blobBatchSize",
                value: self.blob_batch_size,
            });
        }
        Ok(())
    }
}

/// Builder for SessionConfig
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn metadata_batch_size(mut self, size: usize) -> Self {
        self.config.metadata_batch_size = size;
        self
    }

    pub fn blob_batch_size(mut self, size: usize) -> Self {
        self.config.blob_batch_size = size;
        self
    }

    pub fn default_requested_metadata(mut self, group: RequestedMetadataGroup) -> Self {
        self.config.default_requested_metadata = group;
        self
    }

    pub fn strict_metadata_preference(mut self, preference: StrictMetadataPreference) -> Self {
        self.config.strict_metadata_preference = preference;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
