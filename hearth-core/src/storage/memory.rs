//! In-memory implementation of the storage capability.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StorageService;
use crate::error::CoreError;

/// A [`StorageService`] backed by a `HashMap`.
///
/// Values live only as long as the instance. Used by tests and by setups
/// that do not need durability.
#[derive(Debug, Default)]
pub struct InMemoryStorageService {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. Mainly useful in tests.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl StorageService for InMemoryStorageService {
    async fn read_value(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn write_value(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_value(&self, key: &str) -> Result<(), CoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn read_absent_key_returns_none() {
        let storage = InMemoryStorageService::new();
        assert_eq!(storage.read_value("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let storage = InMemoryStorageService::new();
        storage.write_value("greeting", "hello").await.unwrap();
        assert_eq!(
            storage.read_value("greeting").await.unwrap(),
            Some("hello".to_string())
        );
    }

    #[tokio::test]
    async fn write_replaces_previous_value() {
        let storage = InMemoryStorageService::new();
        storage.write_value("key", "first").await.unwrap();
        storage.write_value("key", "second").await.unwrap();
        assert_eq!(
            storage.read_value("key").await.unwrap(),
            Some("second".to_string())
        );
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn remove_is_noop_for_absent_key() {
        let storage = InMemoryStorageService::new();
        storage.remove_value("never-written").await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn remove_deletes_stored_value() {
        let storage = InMemoryStorageService::new();
        storage.write_value("key", "value").await.unwrap();
        storage.remove_value("key").await.unwrap();
        assert_eq!(storage.read_value("key").await.unwrap(), None);
    }
}
