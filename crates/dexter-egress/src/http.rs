//! HTTP `DataClient` with a timeout race

use crate::{
    EgressError, Result,
    client::{HttpClientConfig, create_client},
};
use async_trait::async_trait;
use dexter_core::{
    ApiResponse, DataClient,
    request::{Method, QueryValue, RequestOptions},
};
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Real backend: one outbound HTTP call per data-access call
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            EgressError::ConfigError(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        let client = create_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Base URL + endpoint, with query parameters appended in order
    fn build_url(&self, endpoint: &str, params: &[(String, QueryValue)]) -> Result<Url> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut url =
            Url::parse(&raw).map_err(|e| EgressError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, &value.to_string());
            }
        }
        Ok(url)
    }

    #[instrument(skip(self, options), fields(method = %options.method))]
    async fn execute(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse<Value>> {
        let url = self.build_url(endpoint, &options.params)?;
        let timeout = options.timeout_or(self.config.timeout);

        let mut request = self.client.request(to_reqwest_method(options.method), url.clone());
        if !options
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
        {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let started = Instant::now();
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, EgressError>((status, body))
        };

        let (status, body) = tokio::select! {
            result = exchange => result?,
            _ = tokio::time::sleep(timeout) => {
                return Err(EgressError::Timeout(millis(timeout)));
            }
        };

        debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = millis(started.elapsed()),
            "Received response"
        );

        parse_envelope(status, &body)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Interpret a response body as an envelope.
///
/// The status code is only consulted when the body is not an envelope: an API
/// failure that carries `{success:false, error}` keeps its own message.
fn parse_envelope(status: StatusCode, body: &[u8]) -> Result<ApiResponse<Value>> {
    match serde_json::from_slice::<ApiResponse<Value>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(EgressError::Status(status.as_u16())),
        Err(e) => Err(EgressError::MalformedBody(e.to_string())),
    }
}

#[async_trait]
impl DataClient for HttpClient {
    async fn call(&self, endpoint: &str, options: RequestOptions) -> ApiResponse<Value> {
        match self.execute(endpoint, options).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(endpoint, error = %e, "Data-access call failed");
                dexter_core::Error::from(e).into()
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
