//! # Database Error Types
//!
//! What can go wrong between a report (or the seed tool) and SQLite.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportService ← Folds into ServiceResponse { success: false }         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller reads `message` (the DbError's Display text)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because the Display text reaches report consumers verbatim, messages
//! name the failure category and keep SQL detail short.

use sqlx::error::{DatabaseError, ErrorKind};
use tally_core::CoreError;
use thiserror::Error;

/// Failures raised by the repositories, pool and migrations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (e.g. duplicate category name).
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Item referencing a non-existent category or unit
    /// - Sale line referencing a non-existent sale
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A query argument rejected before reaching SQLite.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Classifies a driver error for the reports and the seed tool.
///
/// ```text
/// RowNotFound                  → NotFound
/// Database, unique key         → UniqueViolation (field = "table.column")
/// Database, foreign key        → ForeignKeyViolation
/// Database, CHECK / NOT NULL   → QueryFailed (SQLite's message)
/// PoolTimedOut                 → PoolExhausted
/// PoolClosed                   → ConnectionFailed
/// anything else                → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => classify_constraint(&*db_err),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

/// SQLite reports unique failures as `UNIQUE constraint failed: items.name`;
/// the offending value is not part of the message, so repositories that
/// know it fill it in afterwards.
fn classify_constraint(db_err: &dyn DatabaseError) -> DbError {
    let message = db_err.message();

    match db_err.kind() {
        ErrorKind::UniqueViolation => {
            let field = message
                .strip_prefix("UNIQUE constraint failed: ")
                .unwrap_or("unknown");
            DbError::duplicate(field, "unknown")
        }
        ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
            message: message.to_string(),
        },
        _ => DbError::QueryFailed(message.to_string()),
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
