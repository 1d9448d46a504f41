//! # Catalog Repository
//!
//! Categories and units: the lookup tables items hang off.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Category, Unit};

/// Repository for categories and units.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Inserted row with its generated id
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    pub async fn insert_category(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Inserting category");

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO categories (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
        )
        .bind(name)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| with_duplicate_value(e, name))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Inserts a unit of measure.
    pub async fn insert_unit(&self, name: &str) -> DbResult<Unit> {
        debug!(name = %name, "Inserting unit");

        let now = Utc::now();
        let result =
            sqlx::query("INSERT INTO units (name, created_at, updated_at) VALUES (?1, ?2, ?2)")
                .bind(name)
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| with_duplicate_value(e, name))?;

        Ok(Unit {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists categories ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Counts categories.
    pub async fn count_categories(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        debug!(count, "Counted categories");
        Ok(count)
    }
}

/// Fills in the offending value, which SQLite's message doesn't carry.
fn with_duplicate_value(err: sqlx::Error, value: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, value),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_insert_and_count_categories() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();

        assert_eq!(catalog.count_categories().await.unwrap(), 0);

        let drinks = catalog.insert_category("Drinks").await.unwrap();
        let snacks = catalog.insert_category("Snacks").await.unwrap();

        assert!(drinks.id > 0);
        assert_ne!(drinks.id, snacks.id);
        assert_eq!(catalog.count_categories().await.unwrap(), 2);

        let names: Vec<String> = catalog
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Drinks", "Snacks"]);
    }

    #[tokio::test]
    async fn test_duplicate_category() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog().insert_category("Drinks").await.unwrap();

        let err = db.catalog().insert_category("Drinks").await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "categories.name");
                assert_eq!(value, "Drinks");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_unit() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let unit = db.catalog().insert_unit("pcs").await.unwrap();
        assert!(unit.id > 0);
        assert_eq!(unit.name, "pcs");
    }
}
