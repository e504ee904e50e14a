//! Data-access client abstraction and the unified facade
//!
//! `DataClient` is the single seam between the real HTTP backend and the
//! in-memory fixture backend. Callers only ever see `Api`, which is built once
//! at startup around whichever implementation the configuration selects.

use crate::{
    envelope::ApiResponse,
    error::Error,
    request::{Method, RequestOptions},
};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A backend capable of performing one data-access call.
///
/// Implementations must never panic or return early with an error: every
/// failure is reported as `ApiResponse::Failure`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Perform a call against `endpoint` (a path such as `/alerts/1`)
    async fn call(&self, endpoint: &str, options: RequestOptions) -> ApiResponse<Value>;

    /// Short backend name used in logs
    fn name(&self) -> &'static str;
}

/// Typed `get/post/put/patch/delete` surface over a `DataClient`
#[derive(Clone)]
pub struct Api {
    client: Arc<dyn DataClient>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("backend", &self.client.name())
            .finish()
    }
}

impl Api {
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    pub fn from_client<C: DataClient + 'static>(client: C) -> Self {
        Self::new(Arc::new(client))
    }

    /// Name of the backend this facade routes to
    pub fn backend(&self) -> &'static str {
        self.client.name()
    }

    /// Perform a call and decode the payload into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        debug!(
            backend = self.client.name(),
            method = %options.method,
            endpoint,
            "Dispatching data-access call"
        );
        decode(self.client.call(endpoint, options).await)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        self.request(endpoint, options.with_method(Method::Get)).await
    }

    pub async fn post<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_body(endpoint, Method::Post, body, options).await
    }

    pub async fn put<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_body(endpoint, Method::Put, body, options).await
    }

    pub async fn patch<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.with_body(endpoint, Method::Patch, body, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        self.request(endpoint, options.with_method(Method::Delete))
            .await
    }

    async fn with_body<T, B>(
        &self,
        endpoint: &str,
        method: Method,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match options.with_method(method).with_json(body) {
            Ok(options) => self.request(endpoint, options).await,
            Err(e) => e.into(),
        }
    }
}

/// Decode a raw JSON payload into the caller's type
fn decode<T: DeserializeOwned>(response: ApiResponse<Value>) -> ApiResponse<T> {
    match response {
        ApiResponse::Success { data: None, meta } => ApiResponse::Success { data: None, meta },
        ApiResponse::Success {
            data: Some(value),
            meta,
        } => match serde_json::from_value(value) {
            Ok(data) => ApiResponse::Success {
                data: Some(data),
                meta,
            },
            Err(e) => Error::MalformedBody(e.to_string()).into(),
        },
        ApiResponse::Failure { error } => ApiResponse::Failure { error },
    }
}

#[cfg(test)]
mod tests;
