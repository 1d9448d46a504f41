//! # Sale Repository
//!
//! Database operations for sales, sale lines and the aggregates the reports
//! are built from.
//!
//! ## Aggregates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         sale_items                                      │
//! │   sale_id │ item_id │ quantity │ price_cents                           │
//! │      1    │    3    │    2     │    398                                │
//! │      1    │    5    │    1     │    250                                │
//! │      2    │    3    │    1     │    199                                │
//! │                                                                         │
//! │  total_amount()          SUM(price_cents)           → $8.47            │
//! │  total_quantity_sold()   SUM(quantity)              → 4                │
//! │  top_items_by_amount(10) GROUP BY item_id                              │
//! │                          ORDER BY SUM DESC, item_id → [(3, 597),       │
//! │                                                        (5, 250)]       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On an empty table the SQL sums are NULL; they come back as zero.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{validate_limit, ItemSales, Money, NewSaleLine, Sale, SaleItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale and its lines.
    ///
    /// Header and lines are written in one transaction: either all rows land
    /// or none do.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The committed sale header
    /// * `Err(DbError::QueryFailed)` - A line violated a constraint (e.g. quantity <= 0)
    /// * `Err(DbError::TransactionFailed)` - Begin or commit failed
    pub async fn create_sale(&self, lines: &[NewSaleLine]) -> DbResult<Sale> {
        debug!(lines = lines.len(), "Creating sale");

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query("INSERT INTO sales (created_at, updated_at) VALUES (?1, ?1)")
            .bind(now)
            .execute(&mut *tx)
            .await?;
        let sale_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, item_id, quantity, price_cents, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.price_cents)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(sale_id, "Sale committed");

        Ok(Sale {
            id: sale_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, created_at, updated_at FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all lines of a sale, in insertion order.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, item_id, quantity, price_cents, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        debug!(count, "Counted sales");
        Ok(count)
    }

    /// Sum of `price_cents` over every sale line.
    pub async fn total_amount(&self) -> DbResult<Money> {
        let total: Option<i64> = sqlx::query_scalar("SELECT SUM(price_cents) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;

        let total = Money::from_nullable_cents(total);
        debug!(total = %total, "Summed sale amount");
        Ok(total)
    }

    /// Sum of `quantity` over every sale line.
    pub async fn total_quantity_sold(&self) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar("SELECT SUM(quantity) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;

        let total = total.unwrap_or(0);
        debug!(total, "Summed quantity sold");
        Ok(total)
    }

    /// Items ranked by summed sale price, highest first.
    ///
    /// Equal sums are ordered by ascending item id. Returns at most `limit`
    /// rows; `limit` must be within `1..=MAX_REPORT_LIMIT`.
    pub async fn top_items_by_amount(&self, limit: u32) -> DbResult<Vec<ItemSales>> {
        let limit = validate_limit(limit)?;

        let rows = sqlx::query_as::<_, ItemSales>(
            r#"
            SELECT item_id, SUM(price_cents) AS total_cents
            FROM sale_items
            GROUP BY item_id
            ORDER BY total_cents DESC, item_id ASC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(limit, rows = rows.len(), "Ranked items by sale amount");
        Ok(rows)
    }
}
