//! # Application Configuration
//!
//! Where the database lives and how large the pool is.
//!
//! ## Resolution Order
//! ```text
//! database path:    --db <PATH>  >  TALLY_DB_PATH  >  platform data dir
//! max connections:  TALLY_DB_MAX_CONNECTIONS  >  5
//! ```
//!
//! ## Platform Data Directory
//! - **macOS**: `~/Library/Application Support/com.tally.pos/tally.db`
//! - **Windows**: `%APPDATA%\tally\pos\data\tally.db`
//! - **Linux**: `~/.local/share/pos/tally.db`

use directories::ProjectDirs;
use std::path::PathBuf;
use tally_db::DbConfig;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "TALLY_DB_PATH";

/// Environment variable overriding the pool size.
pub const MAX_CONNECTIONS_ENV: &str = "TALLY_DB_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DB_FILE_NAME: &str = "tally.db";

/// Resolved configuration of the reports app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Pool size handed to `DbConfig`.
    pub max_connections: u32,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::resolve(None, |key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), but `path` wins over the
    /// environment when given.
    pub fn from_env_with_path(path: Option<PathBuf>) -> AppResult<Self> {
        Self::resolve(path, |key| std::env::var(key).ok())
    }

    fn resolve(
        path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let database_path = match path.or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from)) {
            Some(path) => path,
            None => default_database_path()?,
        };

        let max_connections = match lookup(MAX_CONNECTIONS_ENV) {
            Some(raw) => parse_max_connections(&raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        debug!(
            path = %database_path.display(),
            max_connections,
            "Configuration resolved"
        );

        Ok(AppConfig {
            database_path,
            max_connections,
        })
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

fn parse_max_connections(raw: &str) -> AppResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::config(format!(
            "{MAX_CONNECTIONS_ENV} must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Platform data directory, created if missing.
fn default_database_path() -> AppResult<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "tally", "pos")
        .ok_or_else(|| AppError::config("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_path_and_pool_size() {
        let config = AppConfig::resolve(
            None,
            lookup(&[(DB_PATH_ENV, "/tmp/shop.db"), (MAX_CONNECTIONS_ENV, "8")]),
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.max_connections, 8);

        let db = config.db_config();
        assert_eq!(db.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(db.max_connections, 8);
    }

    #[test]
    fn test_explicit_path_wins() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("./cli.db")),
            lookup(&[(DB_PATH_ENV, "/tmp/shop.db")]),
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("./cli.db"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_invalid_pool_size() {
        for raw in ["0", "-3", "many"] {
            let err = AppConfig::resolve(
                Some(PathBuf::from("./cli.db")),
                lookup(&[(MAX_CONNECTIONS_ENV, raw)]),
            )
            .unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "accepted {raw}");
        }
    }
}
