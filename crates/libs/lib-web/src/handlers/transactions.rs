//! Transaction log endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::WalletStore;
use shared::dto::api::TransactionQuery;
use shared::dto::wallet::Transaction;
use std::sync::Arc;

/// **Route**: `GET /api/transactions?type=<kind>`
///
/// Newest first. `type` narrows to one transaction kind.
pub async fn list_transactions(
    State(store): State<Arc<WalletStore>>,
    Query(query): Query<TransactionQuery>,
) -> Json<Vec<Transaction>> {
    let snapshot = store.snapshot();
    Json(
        snapshot
            .filter_transactions(query.kind)
            .into_iter()
            .cloned()
            .collect(),
    )
}
