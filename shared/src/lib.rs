//! # Shared Wallet Types Library
//!
//! The contract between the wallet backend and any frontend rendering it.
//!
//! ## Structure
//!
//! - **[`dto`]**: Wallet, token, transaction, DApp and API request/response types
//! - **[`utils`]**: Display formatting (addresses, amounts, USD, dates)
//! - **[`route`]**: The route guard deciding where walletless navigation goes
//!
//! ## Wire Format
//!
//! All DTOs serialize with camelCase field names, matching the record the
//! browser client persists:
//!
//! ```rust
//! use shared::dto::wallet::{Network, WalletSnapshot};
//!
//! let snapshot = WalletSnapshot::default();
//! let json = serde_json::to_value(&snapshot).unwrap();
//! assert_eq!(json["currentWallet"], serde_json::Value::Null);
//! assert_eq!(serde_json::to_value(Network::Devnet).unwrap(), "devnet");
//! ```

pub mod dto;
pub mod route;
pub mod utils;

// Wildcard re-exports: everything in a DTO library is public API
pub use dto::*;
pub use utils::*;
