//! Storage trait definitions

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Storage task failed: {0}")]
    Task(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Local key-value store for small string values
///
/// Mirrors the browser's local storage: values are opaque strings, a missing
/// key reads as `None`, and removing a missing key is not an error.
#[async_trait::async_trait]
pub trait LocalStore: Send + Sync {
    /// Get a value from the store
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a value in the store, replacing any previous one
    async fn set(&self, key: &str, value: String) -> StorageResult<()>;

    /// Remove a value from the store
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
