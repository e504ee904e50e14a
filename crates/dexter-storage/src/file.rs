//! JSON-file backed store with write-through persistence

use crate::atomic_writer::AtomicWriter;
use crate::traits::{LocalStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Store kept in memory and mirrored to a single JSON object file
///
/// The file holds `{ "<key>": "<value>", ... }`. It is read once on open; a
/// missing file is an empty store, an unreadable or non-object file is an
/// error. Every mutation rewrites the whole file atomically before returning.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = values.len(), "Opened file store");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` and persist the result while still holding the lock, so
    /// concurrent writers reach the disk in the order they were applied
    async fn update<F>(&self, mutate: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut values = self.values.lock().await;
        let mut next = values.clone();
        mutate(&mut next);

        let content = serde_json::to_vec_pretty(&next)
            .map_err(|e| StorageError::Serialization(format!("Failed to serialize store: {}", e)))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || AtomicWriter::write_all(path, &content))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;

        *values = next;
        Ok(())
    }
}

fn parse(content: &str) -> StorageResult<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| StorageError::Serialization(format!("Failed to load store: {}", e)))?;
    let serde_json::Value::Object(map) = value else {
        return Err(StorageError::InvalidData("store file is not a JSON object".to_string()));
    };

    map.into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => Ok((key, s)),
            other => Err(StorageError::InvalidData(format!(
                "value for '{}' is not a string: {}",
                key, other
            ))),
        })
        .collect()
}

#[async_trait::async_trait]
impl LocalStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        if !self.values.lock().await.contains_key(key) {
            return Ok(());
        }
        self.update(|values| {
            values.remove(key);
        })
        .await
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
