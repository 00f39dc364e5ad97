//! Telemetry configuration loading.
//!
//! Values come from `RETRIEVAL_*` environment variables or a TOML document.
//! Invalid environment values fall back to defaults without failing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `RETRIEVAL_LOG_LEVEL` | info | Log filter directive |
//! | `RETRIEVAL_LOG_FORMAT` | json | `json` or `pretty` |
//! | `RETRIEVAL_LOG_FILE` | unset | Log file path (stderr when unset) |
//! | `RETRIEVAL_SHORT_IDS` | false | Render CIDs in short form |
//! | `RETRIEVAL_METRICS` | facade | `facade`, `memory` or `off` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::recorder::IdFormat;
use crate::telemetry::{LogConfig, LogFormat};

pub const ENV_LOG_LEVEL: &str = "RETRIEVAL_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "RETRIEVAL_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "RETRIEVAL_LOG_FILE";
pub const ENV_SHORT_IDS: &str = "RETRIEVAL_SHORT_IDS";
pub const ENV_METRICS: &str = "RETRIEVAL_METRICS";

/// Where metric observations go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBackend {
    /// The `metrics` crate facade (host installs the exporter).
    #[default]
    Facade,
    /// In-process [`crate::sink::MetricsStore`].
    Memory,
    /// Discard observations.
    Off,
}

impl MetricsBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facade => "facade",
            Self::Memory => "memory",
            Self::Off => "off",
        }
    }
}

impl FromStr for MetricsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facade" => Ok(Self::Facade),
            "memory" => Ok(Self::Memory),
            "off" | "none" | "disabled" => Ok(Self::Off),
            other => Err(other.to_string()),
        }
    }
}

/// All telemetry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log: LogConfig,
    pub id_format: IdFormat,
    pub metrics: MetricsBackend,
}

impl TelemetryConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Key/value pairs of the effective configuration, in env-var naming.
    pub fn effective(&self) -> Vec<(&'static str, String)> {
        vec![
            (ENV_LOG_LEVEL, self.log.level.clone()),
            (ENV_LOG_FORMAT, self.log.format.as_str().to_string()),
            (
                ENV_LOG_FILE,
                self.log
                    .output_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            (
                ENV_SHORT_IDS,
                (self.id_format == IdFormat::Short).to_string(),
            ),
            (ENV_METRICS, self.metrics.as_str().to_string()),
        ]
    }
}

fn parse_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Load configuration from environment variables.
pub fn load() -> TelemetryConfig {
    let defaults = LogConfig::default();
    let level = std::env::var(ENV_LOG_LEVEL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(defaults.level);
    let format = parse_env::<LogFormat>(ENV_LOG_FORMAT, defaults.format);
    let output_path = std::env::var(ENV_LOG_FILE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let id_format = if parse_bool(ENV_SHORT_IDS, false) {
        IdFormat::Short
    } else {
        IdFormat::Long
    };

    TelemetryConfig {
        log: LogConfig {
            format,
            level,
            output_path,
        },
        id_format,
        metrics: parse_env::<MetricsBackend>(ENV_METRICS, MetricsBackend::Facade),
    }
}
