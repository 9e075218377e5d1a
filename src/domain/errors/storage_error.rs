//! Key-value persistence error types.

use thiserror::Error;

/// Errors raised by key-value storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage directory could not be determined.
    #[error("failed to determine storage directory")]
    DirNotFound,
    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialize(String),
}
