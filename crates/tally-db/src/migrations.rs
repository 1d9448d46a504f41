//! # Schema Migrations
//!
//! The catalog and sales schema lives in `migrations/sqlite/` at the
//! workspace root and is compiled into the binary, so the reports CLI and
//! the seed tool can open a fresh file and get every table the reports
//! query.
//!
//! ```text
//!   migrations/sqlite/001_initial_schema.sql
//!     categories, units, items          ◄── counted by the count reports
//!     sales, sale_items                 ◄── summed and ranked by the others
//! ```
//!
//! `_sqlx_migrations` records what has run; a migration that is already
//! recorded is skipped. Schema changes go in a new `NNN_description.sql`
//! file; an applied file must stay byte-identical or sqlx rejects the
//! checksum.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Migrations embedded from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whichever embedded migrations the database hasn't recorded yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let embedded = MIGRATOR.migrations.len();
    debug!(embedded, "Applying pending schema migrations");

    MIGRATOR.run(pool).await?;

    info!(embedded, "Schema up to date");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
///
/// The reports CLI logs this at startup. A database that has never been
/// migrated has no `_sqlx_migrations` table and reports `applied = 0`;
/// any other failure (closed pool, unreadable file) is returned as an error.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let embedded = MIGRATOR.migrations.len();

    let applied: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count,
        Err(sqlx::Error::Database(e)) if e.message().contains("no such table") => 0,
        Err(e) => return Err(e.into()),
    };

    Ok((embedded, applied as usize))
}
