//! Key-value persistence port definition.

use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Port for durable key-value persistence.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Reads the bytes stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Removes `key`, if present.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    /// In-memory key-value store for testing.
    ///
    /// Clones share the same map, so two store instances constructed over
    /// clones observe each other's writes like two processes sharing a disk.
    #[derive(Clone, Default)]
    pub struct MemoryKeyValueStore {
        entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    }

    impl MemoryKeyValueStore {
        /// Creates an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a key with raw bytes.
        pub async fn seed(&self, key: &str, value: &[u8]) {
            self.entries
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
        }
    }

    #[async_trait]
    impl KeyValueStorePort for MemoryKeyValueStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            self.entries
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.write().await.remove(key);
            Ok(())
        }
    }
}
