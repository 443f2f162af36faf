//! # DApp Directory DTOs
//!
//! Catalog entries shown on the Discover screen.

use serde::{Deserialize, Serialize};

/// An external application listing. Catalog entries are immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DApp {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    /// Free-form label such as `"DEX"` or `"Staking"`.
    pub category: String,
    pub url: String,
}

/// Response body for `GET /api/dapps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DAppListResponse {
    pub dapps: Vec<DApp>,
    pub categories: Vec<String>,
    pub is_loading: bool,
}
