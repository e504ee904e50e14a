//! Fixture dispatcher: a simulated backend for local development
//!
//! Every call waits a random delay, then fails with a fixed probability, then
//! resolves the endpoint against the four resource families. The random
//! source and both thresholds are injectable so tests can pin the delay to
//! zero and force the failure roll either way.

use crate::data::{Fixtures, fixtures};
use async_trait::async_trait;
use dexter_core::{
    ApiResponse, DataClient, Error, ResponseMeta,
    request::{Method, RequestOptions},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Page reported in the meta of every fixture collection
pub const FIXTURE_PAGE: u32 = 1;
/// Page size reported in the meta of every fixture collection
pub const FIXTURE_LIMIT: u32 = 10;

/// Resource families the fixture backend knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    Narratives,
    Actors,
    Alerts,
    Reports,
}

impl ResourceFamily {
    pub const ALL: [ResourceFamily; 4] = [
        ResourceFamily::Narratives,
        ResourceFamily::Actors,
        ResourceFamily::Alerts,
        ResourceFamily::Reports,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ResourceFamily::Narratives => "/narratives",
            ResourceFamily::Actors => "/actors",
            ResourceFamily::Alerts => "/alerts",
            ResourceFamily::Reports => "/reports",
        }
    }

    /// Case-insensitive prefix match
    pub fn for_endpoint(endpoint: &str) -> Option<Self> {
        let path = endpoint.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| path.starts_with(family.prefix()))
    }
}

/// Latency and failure injection settings
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Probability in `[0, 1]` that a call fails before dispatch
    pub failure_rate: f64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(800),
            failure_rate: 0.05,
        }
    }
}

impl FixtureConfig {
    /// No delay and no injected failures
    pub fn deterministic() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    /// Failure rate clamped to `[0, 1]`; non-finite values disable injection
    fn effective_failure_rate(&self) -> f64 {
        if self.failure_rate.is_finite() {
            self.failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Resolve a call against the fixture set, with no delay or failure roll
pub fn dispatch(fixtures: &Fixtures, endpoint: &str, method: Method) -> ApiResponse<Value> {
    let family = match (ResourceFamily::for_endpoint(endpoint), method) {
        (Some(family), Method::Get) => family,
        _ => return Error::EndpointNotFound(endpoint.to_string()).into(),
    };

    let (total, data) = match family {
        ResourceFamily::Narratives => (
            fixtures.narratives.len(),
            serde_json::to_value(&fixtures.narratives),
        ),
        ResourceFamily::Actors => (fixtures.actors.len(), serde_json::to_value(&fixtures.actors)),
        ResourceFamily::Alerts => (fixtures.alerts.len(), serde_json::to_value(&fixtures.alerts)),
        ResourceFamily::Reports => (
            fixtures.reports.len(),
            serde_json::to_value(&fixtures.reports),
        ),
    };

    match data {
        Ok(data) => {
            ApiResponse::ok(data).with_meta(ResponseMeta::new(total, FIXTURE_PAGE, FIXTURE_LIMIT))
        }
        Err(e) => Error::Serialization(e).into(),
    }
}

/// Simulated backend serving the static fixture set
pub struct FixtureClient<R = StdRng> {
    config: FixtureConfig,
    rng: Mutex<R>,
    fixtures: &'static Fixtures,
}

impl FixtureClient<StdRng> {
    /// Client seeded from the operating system's entropy source
    pub fn new(config: FixtureConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Client with a reproducible random sequence
    pub fn seeded(config: FixtureConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> FixtureClient<R> {
    pub fn with_rng(config: FixtureConfig, rng: R) -> Self {
        Self {
            config,
            rng: Mutex::new(rng),
            fixtures: fixtures(),
        }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Draw the delay and the failure decision for one call
    fn roll(&self) -> (Duration, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let (low, high) = if self.config.min_delay <= self.config.max_delay {
            (self.config.min_delay, self.config.max_delay)
        } else {
            (self.config.max_delay, self.config.min_delay)
        };
        let delay = if low == high {
            low
        } else {
            let micros = rng.random_range(low.as_micros()..=high.as_micros());
            Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
        };

        let failure_rate = self.config.effective_failure_rate();
        let fail = failure_rate > 0.0 && rng.random_bool(failure_rate);

        (delay, fail)
    }
}

#[async_trait]
impl<R: Rng + Send + 'static> DataClient for FixtureClient<R> {
    async fn call(&self, endpoint: &str, options: RequestOptions) -> ApiResponse<Value> {
        let (delay, fail) = self.roll();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if fail {
            debug!(endpoint, "Injecting simulated failure");
            return Error::Simulated.into();
        }

        dispatch(self.fixtures, endpoint, options.method)
    }

    fn name(&self) -> &'static str {
        "fixtures"
    }
}
