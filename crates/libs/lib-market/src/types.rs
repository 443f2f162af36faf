//! # Price Response Types
//!
//! Readers for the JSON shapes returned by the providers. Both proxies pass
//! provider bodies through untouched, so these run on the consuming side.
//!
//! Birdeye spot price:
//!
//! ```json
//! { "success": true, "data": { "value": 123.45, "updateUnixTime": 1704067200 } }
//! ```
//!
//! CoinGecko market chart (error bodies carry a `status` object instead):
//!
//! ```json
//! { "prices": [[1704067200000, 101.2], [1704070800000, 102.9]] }
//! ```

use crate::error::{PriceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sample of a market chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// `data.value` of a Birdeye price body. Zero and non-numeric values count
/// as absent.
pub fn spot_price(body: &Value) -> Option<f64> {
    body.pointer("/data/value")
        .and_then(Value::as_f64)
        .filter(|v| *v != 0.0 && v.is_finite())
}

/// Error carried in a CoinGecko `status` object, if any.
pub fn status_error(body: &Value) -> Option<String> {
    let status = body.get("status")?;
    let code = status.get("error_code").filter(|v| is_truthy(v));
    let message = status.get("error_message").or_else(|| status.get("error"));

    if code.is_none() && !status.get("error").is_some_and(is_truthy) {
        return None;
    }

    Some(match (code, message) {
        (Some(code), Some(Value::String(msg))) => format!("{} (code {})", msg, code),
        (_, Some(Value::String(msg))) => msg.clone(),
        (Some(code), _) => format!("error code {}", code),
        _ => status.to_string(),
    })
}

/// `prices` series of a CoinGecko market chart body.
pub fn chart_points(body: &Value) -> Result<Vec<PricePoint>> {
    if let Some(error) = status_error(body) {
        return Err(PriceError::Upstream(error));
    }

    let prices = body
        .get("prices")
        .and_then(Value::as_array)
        .ok_or_else(|| PriceError::UnexpectedResponse("missing `prices` array".to_string()))?;

    prices
        .iter()
        .map(|entry| match entry.as_array().map(Vec::as_slice) {
            Some([ts, price]) => match (ts.as_f64(), price.as_f64()) {
                (Some(ts), Some(price)) => Ok(PricePoint {
                    timestamp_ms: ts as i64,
                    price,
                }),
                _ => Err(PriceError::UnexpectedResponse(format!("bad price entry {}", entry))),
            },
            _ => Err(PriceError::UnexpectedResponse(format!("bad price entry {}", entry))),
        })
        .collect()
}

/// `<coin_id>.usd` of a CoinGecko simple-price body.
pub fn simple_price(body: &Value, coin_id: &str) -> Option<f64> {
    body.get(coin_id)?.get("usd")?.as_f64()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
