//! Error types for Dexter Core

use thiserror::Error;

/// Message used by the fixture backend when a failure is injected.
pub const SIMULATED_ERROR_MESSAGE: &str = "Simulated API error for testing purposes";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Transport(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("{}", SIMULATED_ERROR_MESSAGE)]
    Simulated,

    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
