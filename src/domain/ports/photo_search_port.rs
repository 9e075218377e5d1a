//! Photo search port definition.

use async_trait::async_trait;

use crate::domain::entities::PhotoPage;
use crate::domain::errors::FeedError;

/// Port for the remote photo search endpoint.
///
/// Query term, page size, and orientation are fixed per product configuration
/// and carried by the implementation; only the page number varies per call.
#[async_trait]
pub trait PhotoSearchPort: Send + Sync {
    /// Fetches one page of search results. Pages are 1-based.
    async fn search_photos(&self, page: u32) -> Result<PhotoPage, FeedError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::{Mutex, Notify};

    use super::*;
    use crate::domain::entities::{Photo, PhotoAuthor, PhotoUrls, ProfileImageUrls};

    /// Mock search transport with scripted per-call responses.
    ///
    /// Responses are consumed front-to-back; once the script is exhausted,
    /// further calls return an empty final page. An optional gate holds each
    /// fetch until [`MockPhotoSearch::release`] fires, letting tests observe
    /// in-flight state.
    pub struct MockPhotoSearch {
        responses: Mutex<VecDeque<Result<PhotoPage, FeedError>>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl MockPhotoSearch {
        /// Creates a mock that answers calls immediately.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Creates a mock whose fetches block until released.
        pub fn gated() -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            let mock = Self {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
                gate: Some(gate.clone()),
            };
            (mock, gate)
        }

        /// Queues the next response.
        pub fn push_response(&self, response: Result<PhotoPage, FeedError>) {
            self.responses
                .try_lock()
                .expect("script mutated while a fetch is running")
                .push_back(response);
        }

        /// Number of `search_photos` calls observed.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Builds a page of `count` photos with ids `{prefix}-0..count`.
        pub fn page(prefix: &str, count: usize, total: u32, total_pages: u32) -> PhotoPage {
            let photos = (0..count)
                .map(|i| {
                    Photo::new(
                        format!("{prefix}-{i}"),
                        1080,
                        1620,
                        PhotoUrls {
                            raw: format!("https://images.example.com/{prefix}-{i}/raw"),
                            full: format!("https://images.example.com/{prefix}-{i}/full"),
                            regular: format!("https://images.example.com/{prefix}-{i}/regular"),
                            small: format!("https://images.example.com/{prefix}-{i}/small"),
                            thumb: format!("https://images.example.com/{prefix}-{i}/thumb"),
                        },
                        PhotoAuthor {
                            id: "author".into(),
                            username: "tester".into(),
                            name: "Test Author".into(),
                            profile_image: ProfileImageUrls {
                                small: "https://images.example.com/a/s".into(),
                                medium: "https://images.example.com/a/m".into(),
                                large: "https://images.example.com/a/l".into(),
                            },
                        },
                    )
                })
                .collect();
            PhotoPage::new(photos, total, total_pages)
        }
    }

    impl Default for MockPhotoSearch {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl PhotoSearchPort for MockPhotoSearch {
        async fn search_photos(&self, _page: u32) -> Result<PhotoPage, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(PhotoPage::new(Vec::new(), 0, 0)))
        }
    }
}
