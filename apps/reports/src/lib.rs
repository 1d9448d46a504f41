//! # Tally Reports Library
//!
//! Reporting service for the Tally POS database, plus the pieces the
//! `tally-reports` binary is assembled from.
//!
//! ## Module Organization
//! ```text
//! tally_reports_lib/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── config.rs       ◄─── AppConfig: database path and pool size
//! ├── service.rs      ◄─── ReportService: one method per report
//! └── error.rs        ◄─── AppError for startup and CLI failures
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use service::ReportService;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries only report JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: `info,tally=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
