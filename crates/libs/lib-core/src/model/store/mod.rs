//! # Durable Store
//!
//! Key-value persistence for the wallet record and the SQLite pool backing it.

// region: --- Modules
pub mod kv;
pub mod persisted;
// endregion: --- Modules

// region: --- Re-exports
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use persisted::{PersistedState, CURRENT_VERSION, STORAGE_KEY};
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;
use tracing::info;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a SQLite connection pool, creating the database file (and its
/// parent directory) if missing.
pub async fn create_pool(database_url: &str) -> crate::Result<DbPool> {
    if let Some(db_path) = database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if !db_path.starts_with(":memory:") {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        crate::AppError::Storage(format!("Failed to create {:?}: {}", parent, e))
                    })?;
                    info!("Created database directory: {:?}", parent);
                }
            }
        }
    }

    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
