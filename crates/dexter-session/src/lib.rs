//! Dexter Session
//!
//! Owns the authenticated principal for the lifetime of the process:
//! - `SessionStore`, restored from and persisted to a `LocalStore`
//! - `SessionState` snapshots and watch-based change notification
//! - `SessionConfig` with the configurable demo identity

pub mod config;
pub mod state;
pub mod store;

pub use config::{ProfileTemplate, SessionConfig};
pub use state::{AuthOutcome, SessionState};
pub use store::{SessionStore, SESSION_KEY};

use thiserror::Error;

/// Failures inside the store; callers only ever see them as log lines or an
/// `AuthOutcome`
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] dexter_storage::StorageError),

    #[error("Invalid session record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
