//! # Response Mapping Middleware
//!
//! Makes every error response a JSON `{"error": ...}` body. Handlers already
//! answer that way; this catches what axum produces on its own, such as
//! extractor rejections (malformed JSON, bad query strings) and the 404
//! fallback, which arrive as plain text.

use axum::{
    body::Body,
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Largest plain-text error body carried over into the JSON message.
const MAX_ERROR_BODY: usize = 16 * 1024;

pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;

    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let (parts, body) = res.into_parts();
    let message = match axum::body::to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).trim().to_string(),
        Ok(_) => status.canonical_reason().unwrap_or("Error").to_string(),
        Err(e) => {
            warn!("Failed to read error body: {}", e);
            status.canonical_reason().unwrap_or("Error").to_string()
        }
    };

    let mut mapped = (status, Json(json!({ "error": message }))).into_response();
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != axum::http::header::CONTENT_LENGTH {
            mapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    mapped
}

fn is_json(res: &Response<Body>) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}
