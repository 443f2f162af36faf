//! # Upstream Price Providers
//!
//! HTTP client for Birdeye (spot prices by mint) and CoinGecko (market charts
//! and simple prices by coin id). The proxy endpoints relay these bodies
//! verbatim, so the raw methods return the parsed JSON without interpreting it.

use crate::error::{PriceError, Result};
use crate::types;
use lib_core::Config;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MarketClient {
    http: Client,
    birdeye_api_base: String,
    birdeye_api_key: Option<String>,
    coingecko_api_base: String,
}

impl MarketClient {
    pub fn new(
        birdeye_api_base: impl Into<String>,
        birdeye_api_key: Option<String>,
        coingecko_api_base: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PriceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            birdeye_api_base: birdeye_api_base.into().trim_end_matches('/').to_string(),
            birdeye_api_key,
            coingecko_api_base: coingecko_api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.birdeye_api_base.clone(),
            config.birdeye_api_key.clone(),
            config.coingecko_api_base.clone(),
        )
    }

    pub fn has_birdeye_key(&self) -> bool {
        self.birdeye_api_key.is_some()
    }

    /// Raw Birdeye `defi/price` body for `address`.
    pub async fn birdeye_price(&self, address: &str) -> Result<Value> {
        let api_key = self.birdeye_api_key.as_deref().ok_or(PriceError::MissingApiKey)?;
        let url = format!("{}/defi/price", self.birdeye_api_base);

        debug!(%address, "Fetching Birdeye price");

        let response = self
            .http
            .get(&url)
            .query(&[("address", address)])
            .header("X-API-KEY", api_key)
            .header("accept", "application/json")
            .header("x-chain", "solana")
            .send()
            .await
            .map_err(|e| {
                warn!("Birdeye request failed: {}", e);
                PriceError::from(e)
            })?;

        response.json::<Value>().await.map_err(|e| {
            warn!("Birdeye response unreadable: {}", e);
            PriceError::InvalidBody(e.to_string())
        })
    }

    /// Raw CoinGecko `market_chart` body for `token_id` over `days`.
    pub async fn market_chart(&self, token_id: &str, days: &str) -> Result<Value> {
        let url = self.coingecko_url(&["coins", token_id, "market_chart"])?;

        debug!(%token_id, %days, "Fetching CoinGecko market chart");

        let response = self
            .http
            .get(url)
            .query(&[("vs_currency", "usd"), ("days", days)])
            .send()
            .await
            .map_err(|e| {
                warn!("CoinGecko request failed: {}", e);
                PriceError::from(e)
            })?;

        response.json::<Value>().await.map_err(|e| {
            warn!("CoinGecko response unreadable: {}", e);
            PriceError::InvalidBody(e.to_string())
        })
    }

    /// CoinGecko URL with `segments` appended to the base path, each one
    /// percent-encoded so a caller-supplied id stays a single segment.
    fn coingecko_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.coingecko_api_base)
            .map_err(|e| PriceError::Client(format!("Invalid CoinGecko base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PriceError::Client("CoinGecko base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Birdeye spot price for `mint`, `None` when the body carries no price.
    pub async fn spot_price(&self, mint: &str) -> Result<Option<f64>> {
        let body = self.birdeye_price(mint).await?;
        Ok(types::spot_price(&body))
    }

    /// CoinGecko simple USD price for `coin_id`.
    pub async fn fetch_simple_price(&self, coin_id: &str) -> Result<Option<f64>> {
        let url = self.coingecko_url(&["simple", "price"])?;

        let body: Value = self
            .http
            .get(url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = types::status_error(&body) {
            return Err(PriceError::Upstream(error));
        }

        Ok(types::simple_price(&body, coin_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port, serve};
    use axum::{
        extract::{Path, Query},
        http::HeaderMap,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn mock_upstream() -> String {
        let app = Router::new()
            .route(
                "/defi/price",
                get(
                    |headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                        let key = headers.get("X-API-KEY").and_then(|v| v.to_str().ok());
                        let chain = headers.get("x-chain").and_then(|v| v.to_str().ok());
                        if key != Some("test-key") || chain != Some("solana") {
                            return Json(json!({ "success": false, "message": "Unauthorized" }));
                        }
                        match q.get("address").map(String::as_str) {
                            Some("So11111111111111111111111111111111111111112") => {
                                Json(json!({ "success": true, "data": { "value": 123.45 } }))
                            }
                            _ => Json(json!({ "success": true, "data": null })),
                        }
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
                            "vs": q.get("vs_currency"),
                            "prices": [[1704067200000i64, 100.0]]
                        }))
                    },
                ),
            )
            .route(
                "/simple/price",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let mut body = serde_json::Map::new();
                    body.insert(
                        q.get("ids").cloned().unwrap_or_default(),
                        json!({ "usd": 98.7 }),
                    );
                    Json(Value::Object(body))
                }),
            );
        serve(app).await
    }

    #[tokio::test]
    async fn test_birdeye_sends_credentials() {
        let base = mock_upstream().await;
        let client = MarketClient::new(&base, Some("test-key".into()), &base).unwrap();

        let price = client
            .spot_price("So11111111111111111111111111111111111111112")
            .await
            .unwrap();
        assert_eq!(price, Some(123.45));

        let price = client.spot_price("unknown-mint").await.unwrap();
        assert_eq!(price, None);
    }

    #[tokio::test]
    async fn test_birdeye_without_key() {
        let base = mock_upstream().await;
        let client = MarketClient::new(&base, None, &base).unwrap();
        assert!(matches!(
            client.birdeye_price("x").await,
            Err(PriceError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_market_chart_forwards_query() {
        let base = mock_upstream().await;
        let client = MarketClient::new(&base, None, &base).unwrap();

        let body = client.market_chart("solana", "7").await.unwrap();
        assert_eq!(body["id"], "solana");
        assert_eq!(body["days"], "7");
        assert_eq!(body["vs"], "usd");
    }

    #[tokio::test]
    async fn test_market_chart_id_stays_one_path_segment() {
        let base = mock_upstream().await;
        let client = MarketClient::new(&base, None, &base).unwrap();

        let body = client.market_chart("../simple/price?ids=solana", "1").await.unwrap();
        assert_eq!(body["id"], "../simple/price?ids=solana");
        assert!(body.get("prices").is_some());
    }

    #[test]
    fn test_coingecko_url_keeps_base_path() {
        let client =
            MarketClient::new("http://birdeye.test", None, "http://gecko.test/api/v3/").unwrap();
        let url = client.coingecko_url(&["coins", "usd coin/x", "market_chart"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://gecko.test/api/v3/coins/usd%20coin%2Fx/market_chart"
        );
    }

    #[tokio::test]
    async fn test_simple_price() {
        let base = mock_upstream().await;
        let client = MarketClient::new(&base, None, &base).unwrap();
        assert_eq!(client.fetch_simple_price("solana").await.unwrap(), Some(98.7));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let base = closed_port().await;
        let client = MarketClient::new(&base, Some("k".into()), &base).unwrap();
        assert!(matches!(
            client.market_chart("solana", "1").await,
            Err(PriceError::Network(_))
        ));
    }
}
