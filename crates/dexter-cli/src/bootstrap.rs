//! Wire configuration into runtime components
//!
//! The only place that knows which data backend is in use: everything
//! downstream receives an `Api` over a `DataClient` trait object.

use crate::config::{AppConfig, ClientMode};
use anyhow::{Context, Result};
use dexter_core::{Api, DataClient};
use dexter_egress::HttpClient;
use dexter_fixtures::FixtureClient;
use dexter_session::SessionStore;
use dexter_storage::{FileStore, LocalStore, MemoryStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Backend selected by the configured mode
pub fn build_client(config: &AppConfig) -> Result<Arc<dyn DataClient>> {
    let client: Arc<dyn DataClient> = match config.mode {
        ClientMode::Development => Arc::new(FixtureClient::new(config.fixture_config())),
        ClientMode::Production => Arc::new(
            HttpClient::new(config.http_config()).context("Failed to create HTTP client")?,
        ),
    };
    debug!(backend = client.name(), mode = ?config.mode, "Data client ready");
    Ok(client)
}

pub fn build_api(config: &AppConfig) -> Result<Api> {
    Ok(Api::new(build_client(config)?))
}

/// File store at the resolved session file, or memory when none resolves
pub async fn build_storage(config: &AppConfig) -> Result<Arc<dyn LocalStore>> {
    match config.session_file() {
        Some(path) => {
            let store = FileStore::open(&path)
                .await
                .with_context(|| format!("Failed to open session file {}", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("No session file could be resolved; session will not persist");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Session store restored from the configured storage
pub async fn open_session(config: &AppConfig) -> Result<SessionStore> {
    let storage = build_storage(config).await?;
    Ok(SessionStore::open(storage, config.session.clone()).await)
}
