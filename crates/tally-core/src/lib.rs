//! # tally-core: Pure Types & Report Shaping for Tally POS
//!
//! This crate holds everything about the reports that does not need a
//! database: the record types, the payload types, the response envelope
//! and the pure post-processing of query results.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tally POS Reporting Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard / CLI (apps/reports)                  │   │
//! │  │   ReportService ──► ServiceResponse<T> ──► JSON                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ envelope  │  │  report   │  │   │
//! │  │   │   Item    │  │   Money   │  │ Service-  │  │ attach /  │  │   │
//! │  │   │ payloads  │  │           │  │ Response  │  │ chart     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │          SQLite counts, sums, group-by, migrations              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Item, Sale, ...) and report payloads
//! - [`money`] - Money type with integer arithmetic
//! - [`envelope`] - The `{ success, message, data }` wrapper
//! - [`report`] - Report kinds, best-sellers join, chart projection
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{attach_item_details, chart_points, ItemSales};
//!
//! // Item 7 was sold but its record is gone: it shows up as "Unknown".
//! let ranked = vec![ItemSales { item_id: 7, total_cents: Some(2599) }];
//! let top = attach_item_details(ranked, Vec::new());
//!
//! let chart = chart_points(&top);
//! assert_eq!(chart[0].name, "Unknown");
//! assert_eq!(chart[0].value, 25.99);
//! ```

pub mod envelope;
pub mod error;
pub mod money;
pub mod report;
pub mod types;

pub use envelope::{ServiceResponse, SUCCESS_MESSAGE, SUCCESS_MESSAGE_PLAIN, UNKNOWN_ERROR_MESSAGE};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use report::{
    attach_item_details, chart_points, validate_limit, ReportKind, MAX_REPORT_LIMIT,
    TOP_SALE_ITEMS_LIMIT,
};
pub use types::*;
