//! Image transport port definition.

use async_trait::async_trait;
use bytes::Bytes;

/// Errors that can occur while fetching image bytes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response.
    #[error("HTTP {0}")]
    Http(u16),
}

/// Port for downloading raw image bytes.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Downloads the body at `url`. The URL has already been validated.
    async fn fetch(&self, url: &reqwest::Url) -> Result<Bytes, FetchError>;
}
