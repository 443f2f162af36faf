//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! wallet store, the DApp directory, persistence and the HTTP layer.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - user-correctable, rendered inline by the frontend
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`InsufficientFunds`](AppError::InsufficientFunds) → 400 Bad Request
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`NoWallet`](AppError::NoWallet) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - rendered as a transient notification
//!    - [`Upstream`](AppError::Upstream) → 500 (price provider failed)
//!    - [`Storage`](AppError::Storage) → 500 (the in-memory update is kept)
//!    - [`Generation`](AppError::Generation) → 500 (prior wallet untouched)
//!    - [`Config`](AppError::Config), [`Decoding`](AppError::Decoding),
//!      [`Internal`](AppError::Internal) → 500
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_amount(amount: f64) -> Result<f64> {
//!     if amount <= 0.0 {
//!         return Err(AppError::InvalidInput(
//!             "Please enter an amount greater than zero.".to_string()
//!         ));
//!     }
//!     Ok(amount)
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (amount, phrase shape, empty recipient).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Send amount exceeds the token balance.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation requires a current wallet and there is none.
    #[error("No wallet is loaded")]
    NoWallet,

    /// Address or recovery phrase generation failed (entropy source).
    #[error("Generation error: {0}")]
    Generation(String),

    /// Durable storage read/write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Third-party price API failed (network, status, unreadable body).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Persisted or upstream data could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoWallet => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Generation(_)
            | AppError::Storage(_)
            | AppError::Upstream(_)
            | AppError::Decoding(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Server-side failures get a generic message so implementation details
    /// (upstream URLs, SQL errors) never reach the client.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::InsufficientFunds(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::NoWallet => "No wallet found. Create or import a wallet first.".to_string(),
            AppError::Upstream(_) => "Failed to fetch data from the price provider".to_string(),
            AppError::Config(_)
            | AppError::Generation(_)
            | AppError::Storage(_)
            | AppError::Decoding(_)
            | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Variant name, sent as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::InsufficientFunds(_) => "InsufficientFunds",
            AppError::NotFound(_) => "NotFound",
            AppError::NoWallet => "NoWallet",
            AppError::Generation(_) => "Generation",
            AppError::Storage(_) => "Storage",
            AppError::Upstream(_) => "Upstream",
            AppError::Decoding(_) => "Decoding",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Storage(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Storage(format!("Database error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}
