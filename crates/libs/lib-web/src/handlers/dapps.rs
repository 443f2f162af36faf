//! DApp directory endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::DAppDirectory;
use shared::dto::api::DAppQuery;
use shared::dto::dapp::DAppListResponse;
use std::sync::Arc;

/// **Route**: `GET /api/dapps?category=<name>`
///
/// Runs the directory fetch (with its simulated latency), then filters by
/// `category` when given.
pub async fn list_dapps(
    State(directory): State<Arc<DAppDirectory>>,
    Query(query): Query<DAppQuery>,
) -> Json<DAppListResponse> {
    let all = directory.fetch_dapps().await;

    let dapps = match query.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => directory.by_category(category),
        _ => all,
    };

    Json(DAppListResponse {
        dapps,
        categories: directory.categories(),
        is_loading: directory.is_loading(),
    })
}
