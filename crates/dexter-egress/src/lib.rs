//! Dexter Egress
//!
//! This crate provides the real HTTP backend for the data-access layer:
//! - Shared `reqwest` client construction
//! - `HttpClient`, a `DataClient` that races every call against a timeout

pub mod client;
pub mod http;

pub use client::HttpClientConfig;
pub use http::HttpClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EgressError>;

impl From<EgressError> for dexter_core::Error {
    fn from(err: EgressError) -> Self {
        match err {
            EgressError::HttpError(e) => dexter_core::Error::Transport(e.to_string()),
            EgressError::Timeout(ms) => dexter_core::Error::Timeout(ms),
            EgressError::MalformedBody(detail) => dexter_core::Error::MalformedBody(detail),
            EgressError::Status(status) => dexter_core::Error::Status(status),
            EgressError::Encode(e) => dexter_core::Error::Serialization(e),
            EgressError::ConfigError(detail) | EgressError::InvalidUrl(detail) => {
                dexter_core::Error::InvalidRequest(detail)
            }
        }
    }
}
