//! # Handler Tests
//!
//! Requests go through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`. Upstream providers are replaced by a local
//! axum server on an ephemeral port.

mod wallet;

use crate::server::{create_router, AppState};
use axum::{
    body::Body,
    extract::{Path, Query},
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Json, Router,
};
use lib_core::{Config, DAppDirectory, KeyValueStore, MemoryKvStore, WalletStore};
use lib_market::MarketClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-key";
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Stand-in for Birdeye and CoinGecko. Knows the SOL price and any chart.
pub async fn mock_upstream() -> String {
    let app = Router::new()
        .route(
            "/defi/price",
            get(
                |headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    if headers.get("X-API-KEY").and_then(|v| v.to_str().ok()) != Some(TEST_API_KEY) {
                        return (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "success": false, "message": "Unauthorized" })),
                        );
                    }
                    let body = match q.get("address").map(String::as_str) {
                        Some(SOL_MINT) => json!({ "success": true, "data": { "value": 123.45 } }),
                        _ => json!({ "success": true, "data": null }),
                    };
                    (StatusCode::OK, Json(body))
                },
            ),
        )
        .route(
            "/coins/{id}/market_chart",
            get(
                |Path(id): Path<String>, Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "id": id,
                        "days": q.get("days"),
                        "prices": [[1704067200000i64, 101.2], [1704070800000i64, 102.9]]
                    }))
                },
            ),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on.
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(upstream: &str, api_key: Option<&str>) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        birdeye_api_key: api_key.map(str::to_string),
        birdeye_api_base: upstream.to_string(),
        coingecko_api_base: upstream.to_string(),
        simulated_delay_ms: 0,
        dapp_delay_ms: 0,
    }
}

pub async fn test_state_with(config: Config, kv: Arc<dyn KeyValueStore>) -> AppState {
    let wallet = WalletStore::open(kv, &config).await;
    AppState {
        wallet: Arc::new(wallet),
        dapps: Arc::new(DAppDirectory::new(Duration::ZERO)),
        market: Arc::new(MarketClient::from_config(&config).unwrap()),
        config,
    }
}

pub async fn test_state(upstream: &str, api_key: Option<&str>) -> AppState {
    test_state_with(test_config(upstream, api_key), Arc::new(MemoryKvStore::new())).await
}

pub fn test_app(state: AppState) -> Router {
    create_router(state, &[ALLOWED_ORIGIN.to_string()])
}

pub fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run `req` through `app` and decode the JSON body (`Null` when empty).
pub async fn call(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}
