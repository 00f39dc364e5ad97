//! retrieval-telemetry entry point.
//!
//! ## CLI Subcommands
//!
//! - `retrieval-telemetry views [--json]` - Print the metric view catalog
//! - `retrieval-telemetry config show|defaults|validate [--config <path>]` - Inspect configuration

use std::path::PathBuf;
use std::process::ExitCode;

use retrieval_telemetry::cli::{config_cmd, run_views};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "views" => {
            let json = args.get(2).map(|s| s.as_str()) == Some("--json");
            ExitCode::from(run_views(json) as u8)
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            let path = match config_path(&args[3.min(args.len())..]) {
                Ok(path) => path,
                Err(msg) => {
                    eprintln!("{}", msg);
                    print_usage();
                    return ExitCode::FAILURE;
                }
            };
            match subcommand {
                "show" => ExitCode::from(config_cmd::run_show(path.as_deref()) as u8),
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                "validate" => ExitCode::from(config_cmd::run_validate(path.as_deref()) as u8),
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("retrieval-telemetry {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

/// `--config <path>` among the trailing arguments, if present.
fn config_path(rest: &[String]) -> Result<Option<PathBuf>, String> {
    match rest {
        [] => Ok(None),
        [flag, path] if flag == "--config" => Ok(Some(PathBuf::from(path))),
        [flag] if flag == "--config" => Err("--config requires a path".to_string()),
        _ => Err(format!("Unexpected arguments: {}", rest.join(" "))),
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "retrieval-telemetry v{}

USAGE:
    retrieval-telemetry [COMMAND] [OPTIONS]

COMMANDS:
    views        Print the metric view catalog (--json for JSON)
    config       Inspect configuration (show, defaults, validate)
                 --config <path> reads a TOML file instead of the environment
    version      Show version information
    help         Show this help message

ENVIRONMENT:
    RETRIEVAL_LOG_LEVEL   Log filter directive (default: info)
    RETRIEVAL_LOG_FORMAT  json or pretty (default: json)
    RETRIEVAL_LOG_FILE    Log file path (default: stderr)
    RETRIEVAL_SHORT_IDS   Short CID rendering (default: false)
    RETRIEVAL_METRICS     facade, memory or off (default: facade)

EXIT CODES:
    0  Success
    1  Failure / validation warnings
    2  Registry error",
        version
    );
}
