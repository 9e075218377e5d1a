//! HTTP adapter for image downloads.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::domain::ports::{FetchError, ImageFetchPort};

/// Downloads image bytes over HTTP.
pub struct HttpImageTransport {
    client: Client,
}

impl HttpImageTransport {
    /// Creates a transport with the given total request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageTransport {
    async fn fetch(&self, url: &reqwest::Url) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))
    }
}
