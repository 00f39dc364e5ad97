//! Config CLI subcommands: show, defaults, validate.
//!
//! `show` and `validate` read a TOML file when given `--config <path>`,
//! otherwise the `RETRIEVAL_*` environment variables.

use std::path::Path;

use crate::config::{self, TelemetryConfig};
use crate::error::TelemetryError;
use crate::telemetry::LogFormat;

/// Configuration from `path` when given, else from the environment.
pub fn resolve(path: Option<&Path>) -> Result<TelemetryConfig, TelemetryError> {
    match path {
        Some(path) => Ok(TelemetryConfig::from_file(path)?),
        None => Ok(config::load()),
    }
}

/// Print effective config as key-value pairs to stdout.
///
/// Returns 0 on success, 1 if the config file cannot be loaded.
pub fn run_show(path: Option<&Path>) -> i32 {
    match resolve(path) {
        Ok(cfg) => {
            print_config(&cfg);
            0
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            1
        }
    }
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    print_config(&TelemetryConfig::default());
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 if any warnings are found or the file is unreadable.
pub fn run_validate(path: Option<&Path>) -> i32 {
    let cfg = match resolve(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return 1;
        }
    };
    let warnings = validate(&cfg);
    for warning in &warnings {
        eprintln!("WARNING: {}", warning);
    }
    if warnings.is_empty() {
        println!("Configuration is valid.");
        0
    } else {
        1
    }
}

/// Collect human-readable warnings for a configuration.
pub fn validate(cfg: &TelemetryConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&cfg.log.level) {
        warnings.push(format!(
            "{} ({}) is not a valid filter: {}",
            config::ENV_LOG_LEVEL,
            cfg.log.level,
            e
        ));
    }

    if let Some(path) = &cfg.log.output_path {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                warnings.push(format!(
                    "{} directory does not exist: {}",
                    config::ENV_LOG_FILE,
                    dir.display()
                ));
            }
            _ => {}
        }
        if cfg.log.format == LogFormat::Pretty {
            warnings.push(format!(
                "{}=pretty writes multi-line records to {}",
                config::ENV_LOG_FORMAT,
                path.display()
            ));
        }
    }

    warnings
}

fn print_config(cfg: &TelemetryConfig) {
    for (key, value) in cfg.effective() {
        println!("{}={}", key, value);
    }
}
