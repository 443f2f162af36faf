//! # Request Stamping Middleware
//!
//! Tags every request with an ID, stored in the request extensions and echoed
//! in the `X-Request-ID` response header. A well-formed ID sent by the client
//! is kept so a frontend can correlate its own logs with ours.
//!
//! Handlers can read the stamp via `Extension<RequestStamp>`:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use lib_web::middleware::RequestStamp;
//!
//! async fn handler(Extension(stamp): Extension<RequestStamp>) -> String {
//!     format!("Request ID: {}", stamp.id)
//! }
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied request ID accepted.
const MAX_CLIENT_ID_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    /// When the request entered the stack.
    pub received_at: Instant,
}

impl RequestStamp {
    fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_valid_client_id(id))
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            received_at: Instant::now(),
        }
    }
}

fn is_valid_client_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CLIENT_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_headers(req.headers());
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}
