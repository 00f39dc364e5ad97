//! Startup error types.
//!
//! Only initialization can fail. Event recording never returns an error.

use thiserror::Error;

use crate::telemetry::LogError;

/// Errors raised while declaring the metric vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Measure already declared: {0}")]
    DuplicateMeasure(String),
    #[error("Tag key already declared: {0}")]
    DuplicateTagKey(String),
    #[error("Measure not declared in this registry: {0}")]
    UnknownMeasure(String),
    #[error("Tag key not declared in this registry: {0}")]
    UnknownTagKey(String),
    #[error("Distribution bounds must be strictly increasing for {0}")]
    InvalidBounds(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
}

/// Umbrella error for [`crate::Telemetry::start`].
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
