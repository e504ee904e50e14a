//! Shared HTTP client utilities

use crate::{EgressError, Result};
use dexter_core::request::DEFAULT_TIMEOUT_MS;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix prepended to every endpoint path
    pub base_url: String,

    /// Default per-call timeout. Enforced by racing the call against a timer,
    /// not by the underlying client, so a per-request override always wins.
    pub timeout: Duration,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 32,
            user_agent: format!("Dexter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Expire idle connections before the API server closes them
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| EgressError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}
