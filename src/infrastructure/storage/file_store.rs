//! File-backed key-value store.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::debug;

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStorePort;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "galleria";

/// Stores each key as a file under the platform config directory.
///
/// Writes go through a temporary file and an atomic rename, so a crash never
/// leaves a half-written value. Keys must be valid file names.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store under the platform config directory.
    ///
    /// # Errors
    /// Returns `StorageError::DirNotFound` if the platform provides no
    /// config directory.
    pub fn new() -> Result<Self, StorageError> {
        let dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(StorageError::DirNotFound)?;
        Ok(Self { dir })
    }

    /// Creates a store rooted at a specific directory (useful for testing).
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        let value = value.to_vec();

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            std::fs::create_dir_all(&dir)?;
            let mut temp_file = tempfile::NamedTempFile::new_in(&dir)?;
            temp_file.write_all(&value)?;
            temp_file.persist(&path).map_err(|e| StorageError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        debug!(key, "Value persisted");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
