//! # Response Envelope
//!
//! Every report returns the same wrapper so callers handle success and
//! failure in one place:
//!
//! ```json
//! { "success": true,  "message": "Success!",           "data": { "saleCount": 42 } }
//! { "success": false, "message": "Query failed: ...",  "data": null }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Message on most successful reports.
pub const SUCCESS_MESSAGE: &str = "Success!";

/// Message on the units-sold and chart reports.
pub const SUCCESS_MESSAGE_PLAIN: &str = "Success";

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error!";

/// Uniform `{ success, message, data }` result of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ServiceResponse<T> {
    /// Successful envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        ServiceResponse {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed envelope, `data` is always `None`.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        ServiceResponse {
            success: false,
            message,
            data: None,
        }
    }

    /// Folds a fallible query result into an envelope.
    pub fn from_result<E: Display>(result: Result<T, E>, success_message: &str) -> Self {
        match result {
            Ok(data) => ServiceResponse::ok(success_message, data),
            Err(err) => ServiceResponse::failure(err.to_string()),
        }
    }

    /// Transforms the payload, keeping the success flag and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
