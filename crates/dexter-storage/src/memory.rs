//! In-process store

use crate::traits::{LocalStore, StorageResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Values live only as long as the store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl LocalStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_and_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("dexterUser").await.unwrap(), None);

        store.set("dexterUser", "{\"id\":\"user-123\"}".to_string()).await.unwrap();
        assert_eq!(
            store.get("dexterUser").await.unwrap().as_deref(),
            Some("{\"id\":\"user-123\"}")
        );
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryStore::with_entries([("theme", "light")]);
        store.set("theme", "dark".to_string()).await.unwrap();

        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = MemoryStore::with_entries([("dexterUser", "{}")]);

        store.remove("dexterUser").await.unwrap();
        store.remove("dexterUser").await.unwrap();

        assert!(store.is_empty().await);
    }
}
