//! # Key-Value Storage
//!
//! Opaque string blobs under string keys. The wallet store only ever reads and
//! writes one key; the abstraction exists so tests and ephemeral runs can swap
//! SQLite for memory.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, KeyValueStore, SqliteKvStore};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite:data/wallet.db").await?;
//! let kv = SqliteKvStore::new(pool).await?;
//!
//! kv.set("how-wallet", r#"{"state":{},"version":1}"#).await?;
//! assert!(kv.get("how-wallet").await?.is_some());
//! # Ok(())
//! # }
//! ```

use super::DbPool;
use crate::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Durable key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;
}

/// SQLite-backed store: one row per key in `kv_store`.
pub struct SqliteKvStore {
    pool: DbPool,
}

impl SqliteKvStore {
    /// Wrap `pool`, creating the `kv_store` table if needed.
    pub async fn new(pool: DbPool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-process store; contents die with the process.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> DbPool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_sqlite_set_get_overwrite_remove() {
        let kv = SqliteKvStore::new(setup_test_db().await).await.unwrap();

        assert_eq!(kv.get("how-wallet").await.unwrap(), None);

        kv.set("how-wallet", "first").await.unwrap();
        kv.set("how-wallet", "second").await.unwrap();
        assert_eq!(kv.get("how-wallet").await.unwrap().as_deref(), Some("second"));

        assert!(kv.remove("how-wallet").await.unwrap());
        assert!(!kv.remove("how-wallet").await.unwrap());
        assert_eq!(kv.get("how-wallet").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_schema_creation_is_idempotent() {
        let pool = setup_test_db().await;
        let first = SqliteKvStore::new(pool.clone()).await.unwrap();
        first.set("k", "v").await.unwrap();

        let second = SqliteKvStore::new(pool).await.unwrap();
        assert_eq!(second.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let kv = MemoryKvStore::new();
        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("1"));
        assert!(kv.remove("a").await.unwrap());
        assert_eq!(kv.get("a").await.unwrap(), None);
    }
}
