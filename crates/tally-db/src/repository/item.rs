//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Detail Lookup for Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Best-sellers ranking yields ids:  [12, 4, 99]                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_by_ids(&[12, 4, 99])                                             │
//! │       │   SELECT ... FROM items WHERE id IN (?, ?, ?)                  │
//! │       ▼                                                                 │
//! │  [Item 4, Item 12]   ← any order, missing ids simply absent            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Item, NewItem};

const ITEM_COLUMNS: &str =
    "id, category_id, unit_id, name, price_cents, stock_quantity, created_at, updated_at";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Ok(Item)` - Inserted item with generated id and timestamps
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown category or unit
    pub async fn insert(&self, item: &NewItem) -> DbResult<Item> {
        debug!(name = %item.name, category_id = item.category_id, "Inserting item");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO items (
                category_id, unit_id, name, price_cents, stock_quantity,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(item.category_id)
        .bind(item.unit_id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.stock_quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            category_id: item.category_id,
            unit_id: item.unit_id,
            name: item.name.clone(),
            price_cents: item.price_cents,
            stock_quantity: item.stock_quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets an item by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Fetches every item whose id is in `ids`.
    ///
    /// Order of the result is unspecified and ids without a row are skipped.
    /// An empty `ids` returns an empty list without touching the database.
    pub async fn find_by_ids(&self, ids: &[i64]) -> DbResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = ids.len(), "Fetching item details");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let items = query.build_query_as::<Item>().fetch_all(&self.pool).await?;

        debug!(requested = ids.len(), found = items.len(), "Item details fetched");
        Ok(items)
    }

    /// Deletes an item.
    ///
    /// Sale lines keep pointing at the removed id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        debug!(count, "Counted items");
        Ok(count)
    }
}
