//! # Domain Types
//!
//! Records stored by the point-of-sale and the payloads the reports return.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐        │
//! │  │  Category    │◄──│      Item        │──►│      Unit        │        │
//! │  │  id, name    │   │  id              │   │  id, name        │        │
//! │  └──────────────┘   │  category_id     │   └──────────────────┘        │
//! │                     │  unit_id         │                                │
//! │                     │  price_cents     │                                │
//! │                     │  stock_quantity  │                                │
//! │                     └────────▲─────────┘                                │
//! │                              │ item_id                                  │
//! │  ┌──────────────┐   ┌────────┴─────────┐                                │
//! │  │    Sale      │◄──│    SaleItem      │                                │
//! │  │  id          │   │  quantity        │                                │
//! │  └──────────────┘   │  price_cents     │ ◄── summed by revenue reports  │
//! │                     └──────────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are SQLite `INTEGER PRIMARY KEY` values. Id `0` is never assigned by
//! the database, which is what makes it usable for [`Item::unknown`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A product category ("Beverages", "Snacks", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A unit of measure an item is sold in ("pcs", "kg", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// An item available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Row id.
    pub id: i64,

    /// Category this item is listed under.
    pub category_id: i64,

    /// Unit of measure.
    pub unit_id: i64,

    /// Display name shown on receipts and in reports.
    pub name: String,

    /// Current list price in cents, exposed as `price` in major units.
    #[serde(rename = "price", with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price_cents: i64,

    /// Units on hand.
    pub stock_quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create an item; the database assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub category_id: i64,
    pub unit_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock_quantity: i64,
}

impl Item {
    /// Name carried by the placeholder item.
    pub const UNKNOWN_NAME: &'static str = "Unknown";

    /// Placeholder for an item that was sold but has no detail row anymore.
    ///
    /// ```rust
    /// use tally_core::Item;
    ///
    /// let item = Item::unknown();
    /// assert_eq!(item.id, 0);
    /// assert_eq!(item.name, "Unknown");
    /// ```
    pub fn unknown() -> Self {
        let now = Utc::now();
        Item {
            id: 0,
            category_id: 0,
            unit_id: 0,
            name: Self::UNKNOWN_NAME.to_string(),
            price_cents: 0,
            stock_quantity: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the list price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Sales
// =============================================================================

/// A sale transaction header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A line of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub item_id: i64,
    /// Units sold on this line.
    pub quantity: i64,
    /// Amount charged for this line, in cents.
    pub price_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A line to record when creating a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSaleLine {
    pub item_id: i64,
    pub quantity: i64,
    pub price_cents: i64,
}

/// One row of the "revenue per item" ranking.
///
/// `total_cents` stays optional because it comes straight from `SUM()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemSales {
    pub item_id: i64,
    pub total_cents: Option<i64>,
}

impl ItemSales {
    /// Summed sale price, NULL read as zero.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_nullable_cents(self.total_cents)
    }
}

// =============================================================================
// Report Payloads
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryCount {
    pub category_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemCount {
    pub item_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleCount {
    pub sale_count: i64,
}

/// Revenue across all sale lines, in major units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalSaleAmount {
    pub total_sale_amount: f64,
}

/// Units sold across all sale lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalItemSold {
    pub total_item_sold: i64,
}

/// An entry of the best-sellers report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopSaleItem {
    pub item_details: Item,
    /// Summed sale price in major units.
    pub total_amount: f64,
}

/// A `{ name, value }` pair as chart libraries expect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}
