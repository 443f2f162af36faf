//! # Request/Response Logging Middleware
//!
//! One structured line per request and one per response, correlated by the
//! request ID from [`stamp_req`](super::stamp_req). Headers are logged at
//! debug level with credentials redacted; bodies are never logged since
//! wallet responses carry recovery phrases.

use super::mw_req_stamp::RequestStamp;
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use tracing::{debug, error, info, warn};

/// Headers whose values are replaced before logging.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "x-auth-token"];

const REDACTED: &str = "***REDACTED***";

/// Header name/value pairs safe to log.
pub fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), REDACTED.to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    let (request_id, received_at) = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| (s.id.clone(), s.received_at))
        .unwrap_or_else(|| ("unknown".to_string(), std::time::Instant::now()));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(
        request_id = %request_id,
        headers = ?redact_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = received_at.elapsed();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(
            request_id = %request_id,
            status,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} [SERVER ERROR]",
            method,
            path,
            status
        );
    } else if response.status().is_client_error() {
        warn!(
            request_id = %request_id,
            status,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} [CLIENT ERROR]",
            method,
            path,
            status
        );
    } else {
        info!(
            request_id = %request_id,
            status,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {}",
            method,
            path,
            status
        );
    }

    response
}
