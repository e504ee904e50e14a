//! Common test utilities for integration tests

use async_trait::async_trait;
use dexter_core::{Api, ApiResponse, DataClient, request::RequestOptions};
use dexter_egress::{HttpClient, HttpClientConfig};
use dexter_fixtures::{FixtureClient, FixtureConfig};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::MockServer;

/// Fixture-backed facade with no delay and no injected failures
#[allow(dead_code)]
pub fn fixture_api() -> Api {
    Api::from_client(FixtureClient::seeded(FixtureConfig::deterministic(), 1))
}

/// HTTP-backed facade pointed at `server`'s `/api/v1`
#[allow(dead_code)]
pub fn http_api(server: &MockServer) -> Api {
    let config = HttpClientConfig::default().with_base_url(format!("{}/api/v1", server.uri()));
    Api::from_client(HttpClient::new(config).unwrap())
}

/// Wraps a client and delays the n-th call by `delays[n]`
#[allow(dead_code)]
pub struct ScriptedLatency {
    inner: Arc<dyn DataClient>,
    delays: Vec<Duration>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedLatency {
    pub fn new(inner: Arc<dyn DataClient>, delays: Vec<Duration>) -> Self {
        Self {
            inner,
            delays,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DataClient for ScriptedLatency {
    async fn call(&self, endpoint: &str, options: RequestOptions) -> ApiResponse<Value> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.get(n).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;
        self.inner.call(endpoint, options).await
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
