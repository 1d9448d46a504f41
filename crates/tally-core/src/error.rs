//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  └── CoreError        - Report selection failures                      │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  reports app errors                                                    │
//! │  └── AppError         - Startup / configuration failures               │
//! │                                                                         │
//! │  Query failures never escape the report service: they are folded      │
//! │  into a `ServiceResponse { success: false, .. }` envelope.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A report name that does not match any [`crate::ReportKind`].
    #[error("Unknown report '{name}' (expected one of: {expected})")]
    UnknownReport { name: String, expected: String },

    /// A ranking limit outside the accepted range.
    #[error("Report limit {requested} must be between 1 and {max}")]
    InvalidLimit { requested: u32, max: u32 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
