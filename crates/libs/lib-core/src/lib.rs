//! # Core Library
//!
//! Error type, configuration, the wallet and DApp state containers, and the
//! key-value store the wallet record is persisted to.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use model::{DAppDirectory, WalletStore};
