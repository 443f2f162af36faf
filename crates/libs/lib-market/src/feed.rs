//! # Price Feed
//!
//! Reads the wallet server's two proxy endpoints, `/api/price` and
//! `/api/market-chart`, and normalizes what comes back. Failures are logged
//! and returned; nothing here writes into the wallet store.
//!
//! ```rust,no_run
//! # use lib_market::PriceFeed;
//! # async fn example() -> lib_market::Result<()> {
//! let feed = PriceFeed::new("http://127.0.0.1:3001")?;
//!
//! // `None` when the provider has no price for the mint.
//! if let Some(price) = feed.fetch_token_price("So11111111111111111111111111111111111111112").await? {
//!     println!("SOL: ${:.2}", price);
//! }
//!
//! let week = feed.fetch_chart_prices("solana", "7").await?;
//! println!("{} samples", week.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{PriceError, Result};
use crate::types::{self, PricePoint};
use crate::upstream::REQUEST_TIMEOUT;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{error, warn};

pub struct PriceFeed {
    http: Client,
    base_url: String,
}

impl PriceFeed {
    /// Feed reading the proxies served at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PriceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Current USD price of `mint`.
    pub async fn fetch_token_price(&self, mint: &str) -> Result<Option<f64>> {
        let url = format!("{}/api/price", self.base_url);
        let result: Result<Value> = async {
            let response = self.http.get(&url).query(&[("address", mint)]).send().await?;
            read_body(response).await
        }
        .await;

        let body = result.map_err(|e| {
            error!(%mint, "Failed to fetch token price: {}", e);
            e
        })?;

        let price = types::spot_price(&body);
        if price.is_none() {
            warn!(%mint, "No price found for token");
        }
        Ok(price)
    }

    /// Historical USD prices of `token_id` over `days`, oldest first.
    pub async fn fetch_chart_prices(&self, token_id: &str, days: &str) -> Result<Vec<PricePoint>> {
        let url = format!("{}/api/market-chart", self.base_url);
        let result: Result<Vec<PricePoint>> = async {
            let response = self
                .http
                .get(&url)
                .query(&[("tokenId", token_id), ("days", days)])
                .send()
                .await?;
            let body = read_body(response).await?;
            types::chart_points(&body)
        }
        .await;

        result.map_err(|e| {
            match &e {
                PriceError::UnexpectedResponse(_) => {
                    warn!(%token_id, "Unexpected market chart response: {}", e)
                }
                _ => error!(%token_id, "Failed to fetch market chart: {}", e),
            }
            e
        })
    }
}

/// JSON body of a proxy response. Non-2xx answers carry `{"error": ...}`.
async fn read_body(response: Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| PriceError::InvalidBody(e.to_string()))?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(PriceError::Upstream(message));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port, serve};
    use axum::{
        extract::Query,
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn mock_proxy() -> String {
        let app = Router::new()
            .route(
                "/api/price",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    match q.get("address").map(String::as_str) {
                        Some("sol") => Json(json!({ "data": { "value": 123.45 } })).into_response(),
                        Some("empty") => Json(json!({ "data": {} })).into_response(),
                        Some("garbled") => "<html>".into_response(),
                        _ => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({ "error": "Failed to fetch data from the price provider" })),
                        )
                            .into_response(),
                    }
                }),
            )
            .route(
                "/api/market-chart",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    match q.get("tokenId").map(String::as_str) {
                        Some("solana") => Json(json!({
                            "prices": [[1704067200000i64, 101.2], [1704070800000i64, 102.9]]
                        })),
                        Some("limited") => Json(json!({
                            "status": { "error_code": 429, "error_message": "Rate limited" }
                        })),
                        _ => Json(json!({ "market_caps": [] })),
                    }
                }),
            );
        serve(app).await
    }

    #[tokio::test]
    async fn test_token_price() {
        let feed = PriceFeed::new(mock_proxy().await).unwrap();

        assert_eq!(feed.fetch_token_price("sol").await.unwrap(), Some(123.45));
        assert_eq!(feed.fetch_token_price("empty").await.unwrap(), None);
        assert!(matches!(
            feed.fetch_token_price("garbled").await,
            Err(PriceError::InvalidBody(_))
        ));
        assert!(matches!(
            feed.fetch_token_price("broken").await,
            Err(PriceError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_token_price_network_error() {
        let feed = PriceFeed::new(closed_port().await).unwrap();
        let result = feed.fetch_token_price("sol").await;
        assert!(matches!(result, Err(PriceError::Network(_))));
        assert_eq!(result.ok().flatten(), None);
    }

    #[tokio::test]
    async fn test_chart_prices() {
        let feed = PriceFeed::new(mock_proxy().await).unwrap();

        let points = feed.fetch_chart_prices("solana", "1").await.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].price, 102.9);

        assert!(matches!(
            feed.fetch_chart_prices("limited", "1").await,
            Err(PriceError::Upstream(_))
        ));
        assert!(matches!(
            feed.fetch_chart_prices("unknown", "1").await,
            Err(PriceError::UnexpectedResponse(_))
        ));
    }
}
