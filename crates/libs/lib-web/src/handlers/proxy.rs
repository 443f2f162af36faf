//! # Price Proxy Handlers
//!
//! Pass-through endpoints for the two price providers. Each forwards one query
//! parameter upstream and relays the JSON body as-is, so the Birdeye API key
//! stays on the server.
//!
//! ## Endpoints
//!
//! - `GET /api/price?address=<mint>` - Birdeye spot price
//! - `GET /api/market-chart?tokenId=<id>&days=<n>` - CoinGecko market chart
//!
//! Successful answers carry `Access-Control-Allow-Origin: *` so any page can
//! read them. These routes are mounted outside the wallet API's CORS layer.
//!
//! ```bash
//! curl "http://localhost:3001/api/price?address=So11111111111111111111111111111111111111112"
//! curl "http://localhost:3001/api/market-chart?tokenId=solana&days=7"
//! ```

use axum::{
    extract::{Query, State},
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use lib_market::{MarketClient, PriceError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, instrument};

/// Days of history when the client does not ask for a range.
pub const DEFAULT_CHART_DAYS: &str = "1";

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketChartParams {
    pub token_id: Option<String>,
    pub days: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn relay(body: Value) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

fn upstream_failure(provider: &str, err: PriceError) -> Response {
    error!(provider, "Proxy request failed: {}", err);
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Failed to fetch data from {}", provider),
    )
}

/// **Route**: `GET /api/price`
#[instrument(skip(market))]
pub async fn birdeye_price(
    State(market): State<Arc<MarketClient>>,
    Query(params): Query<PriceParams>,
) -> Response {
    let Some(address) = required(params.address) else {
        return error_body(StatusCode::BAD_REQUEST, "address is required");
    };

    match market.birdeye_price(&address).await {
        Ok(body) => relay(body),
        Err(e) => upstream_failure("Birdeye", e),
    }
}

/// **Route**: `GET /api/market-chart`
#[instrument(skip(market))]
pub async fn market_chart(
    State(market): State<Arc<MarketClient>>,
    Query(params): Query<MarketChartParams>,
) -> Response {
    let Some(token_id) = required(params.token_id) else {
        return error_body(StatusCode::BAD_REQUEST, "tokenId is required");
    };
    let days = required(params.days).unwrap_or_else(|| DEFAULT_CHART_DAYS.to_string());

    match market.market_chart(&token_id, &days).await {
        Ok(body) => relay(body),
        Err(e) => upstream_failure("CoinGecko", e),
    }
}
