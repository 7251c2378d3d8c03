//! Error types shared between the engine, its backends, and the driver.

use std::fmt;

use crate::visual::ModelId;

/// An asset load was rejected by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoadError {
    pub model: ModelId,
    pub reason: String,
}

impl AssetLoadError {
    pub fn new(model: ModelId, reason: impl Into<String>) -> Self {
        Self {
            model,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load model `{}`: {}", self.model, self.reason)
    }
}

impl std::error::Error for AssetLoadError {}

/// Simulation config could not be used.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON did not parse.
    Parse(serde_json::Error),
    /// The values parsed but make no sense together.
    Invalid(String),
    /// The config file could not be read.
    Read {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Read { path, source } => {
                write!(f, "cannot read config `{path}`: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
            ConfigError::Read { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
