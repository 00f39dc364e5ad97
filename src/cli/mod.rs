//! CLI subcommands for inspecting the telemetry contract.
//!
//! ## Usage
//!
//! ```bash
//! retrieval-telemetry views          # View catalog, one per line
//! retrieval-telemetry views --json   # View catalog as JSON
//! retrieval-telemetry config show    # Effective configuration
//! ```

pub mod config_cmd;
pub mod views_cmd;

pub use views_cmd::run_views;
