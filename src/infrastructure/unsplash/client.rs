//! Unsplash search API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::SearchResponseDto;
use crate::domain::entities::PhotoPage;
use crate::domain::errors::FeedError;
use crate::domain::ports::PhotoSearchPort;
use crate::infrastructure::config::SearchConfig;

/// Unsplash API search client.
///
/// Carries the fixed product configuration (query term, page size,
/// orientation, client credential); only the page number varies per call.
pub struct UnsplashClient {
    client: Client,
    config: SearchConfig,
}

impl UnsplashClient {
    /// Creates a client for the given search configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: SearchConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FeedError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn classify_send_error(e: &reqwest::Error) -> FeedError {
        if e.is_builder() {
            FeedError::invalid_request(e.to_string())
        } else if e.is_timeout() {
            FeedError::transport("request timed out")
        } else if e.is_connect() {
            FeedError::transport("failed to connect to Unsplash")
        } else {
            FeedError::transport(e.to_string())
        }
    }
}

#[async_trait]
impl PhotoSearchPort for UnsplashClient {
    async fn search_photos(&self, page: u32) -> Result<PhotoPage, FeedError> {
        let url = format!("{}/search/photos", self.config.base_url);

        debug!(page, query = %self.config.query, "Searching photos");

        let page_param = page.to_string();
        let per_page_param = self.config.per_page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", self.config.query.as_str()),
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
                ("orientation", self.config.orientation.as_str()),
            ])
            .header(
                header::AUTHORIZATION,
                format!("Client-ID {}", self.config.access_key),
            )
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Unsplash API");
                Self::classify_send_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
                warn!(status = status.as_u16(), "Unsplash rejected the client credential");
            }
            return Err(FeedError::http(status.as_u16()));
        }

        let dto: SearchResponseDto = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse search response");
            FeedError::decode(e.to_string())
        })?;

        debug!(
            page,
            results = dto.results.len(),
            total_pages = dto.total_pages,
            "Search page fetched"
        );

        Ok(PhotoPage::from(dto))
    }
}
