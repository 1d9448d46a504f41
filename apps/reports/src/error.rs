//! # Application Error Type
//!
//! Errors that stop the reports app before or around report execution.
//! Report queries themselves never surface here: their failures are folded
//! into failure envelopes by [`ReportService`](crate::service::ReportService).
//!
//! ## Exit Codes
//! ```text
//! ┌──────────────────────────────┬───────────┐
//! │ Error                        │ Exit code │
//! ├──────────────────────────────┼───────────┤
//! │ Core(UnknownReport), Config  │     2     │
//! │ other Core errors            │     1     │
//! │ Database, Io, Serialize      │     1     │
//! └──────────────────────────────┴───────────┘
//! ```

use tally_core::CoreError;
use tally_db::DbError;
use thiserror::Error;

/// Error raised by the reports app.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Opening or migrating the database failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Rejected by report logic, e.g. an unknown report name on the
    /// command line.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Filesystem error while preparing the data directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an envelope as JSON failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Core(CoreError::UnknownReport { .. }) | AppError::Config(_) => 2,
            AppError::Core(_) | AppError::Database(_) | AppError::Io(_) | AppError::Serialize(_) => 1,
        }
    }
}

/// Result type for the reports app.
pub type AppResult<T> = Result<T, AppError>;
