//! Errors raised while fetching price data.

use lib_core::AppError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PriceError>;

#[derive(Debug, Error)]
pub enum PriceError {
    /// Request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// The provider reported an error in its response body.
    #[error("Provider returned an error: {0}")]
    Upstream(String),

    /// JSON was valid but lacked the expected fields.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// No Birdeye API key is configured.
    #[error("BIRDEYE_API_KEY is not set")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for PriceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PriceError::InvalidBody(err.to_string())
        } else {
            PriceError::Network(err.to_string())
        }
    }
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::MissingApiKey | PriceError::Client(_) => AppError::Config(err.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
