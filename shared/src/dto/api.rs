//! # Wallet API DTOs
//!
//! Request and response bodies for the wallet application API served by
//! `lib-web`.
//!
//! ## Example
//!
//! ```text
//! POST /api/wallet/send
//! Content-Type: application/json
//!
//! { "token": "SOL", "amount": 0.5, "recipient": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin" }
//! ```
//!
//! ```text
//! HTTP/1.1 201 Created
//!
//! {
//!   "id": "3f8c...",
//!   "type": "send",
//!   "status": "success",
//!   "amount": 0.5,
//!   "token": "SOL",
//!   "timestamp": 1704067200000,
//!   "address": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"
//! }
//! ```

use super::wallet::{Network, TransactionType};
use serde::{Deserialize, Serialize};

/// Standard error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Import by recovery phrase or by private key. Exactly one of the two is expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWalletRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Raw phrase text as typed, words separated by whitespace.
    #[serde(default)]
    pub seed_phrase: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectWalletRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNetworkRequest {
    pub network: Network,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTokenRequest {
    /// Token symbol.
    pub token: String,
    pub amount: f64,
    pub recipient: String,
}

/// Query for `GET /api/transactions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type", default)]
    pub kind: Option<TransactionType>,
}

/// Query for `GET /api/dapps`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DAppQuery {
    #[serde(default)]
    pub category: Option<String>,
}
