//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportService                                                         │
//! │       │                                                                 │
//! │       │  db.sales().top_items_by_amount(10)                            │
//! │       │  db.items().find_by_ids(&ids)                                  │
//! │       ▼                                                                 │
//! │  CatalogRepository   ItemRepository   SaleRepository                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Categories and units
//! - [`ItemRepository`](item::ItemRepository) - Items and detail lookup
//! - [`SaleRepository`](sale::SaleRepository) - Sales and sale aggregates

pub mod catalog;
pub mod item;
pub mod sale;
