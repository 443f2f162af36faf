//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the wallet backend, its persisted
//! record and the frontend.
//!
//! ## Module Organization
//!
//! - [`wallet`] - Wallet, token, transaction and store snapshot records
//! - [`dapp`] - DApp directory catalog entries
//! - [`api`] - Request/response bodies of the wallet API
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase (`#[serde(rename_all = "camelCase")]`)
//! - **Optional fields**: Omitted when `None`
//! - **Enums**: lowercase strings (`"mainnet"`, `"send"`, `"pending"`)

pub mod api;
pub mod dapp;
pub mod wallet;

pub use api::*;
pub use dapp::*;
pub use wallet::*;
