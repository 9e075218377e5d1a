//! Paged photo feed loading with incremental accumulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

use crate::domain::entities::{Photo, PhotoPage};
use crate::domain::errors::FeedError;
use crate::domain::ports::PhotoSearchPort;

/// Message sent to the feed consumer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fetch started (`true`) or finished (`false`).
    LoadingChanged(bool),
    /// The full accumulated photo list after a successful fetch.
    PhotosUpdated(Vec<Photo>),
    /// A fetch failed; accumulated state is unchanged.
    LoadFailed(FeedError),
}

#[derive(Debug, Default)]
struct FeedState {
    /// Last successfully loaded page; 0 when nothing is loaded.
    current_page: u32,
    has_more_pages: bool,
    accumulated: Vec<Photo>,
}

/// Drives paged retrieval from the search endpoint.
///
/// At most one fetch is in flight per loader: both entry points no-op while a
/// fetch is running. The page counter only advances on success, so a failed
/// page is retried by the next [`PhotoFeedLoader::load_more`] rather than
/// skipped.
pub struct PhotoFeedLoader {
    search: Arc<dyn PhotoSearchPort>,
    events: mpsc::UnboundedSender<FeedEvent>,
    state: RwLock<FeedState>,
    in_flight: AtomicBool,
}

impl std::fmt::Debug for PhotoFeedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoFeedLoader")
            .field("in_flight", &self.in_flight.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl PhotoFeedLoader {
    /// Creates a loader delivering events over `events`.
    #[must_use]
    pub fn new(
        search: Arc<dyn PhotoSearchPort>,
        events: &mpsc::UnboundedSender<FeedEvent>,
    ) -> Self {
        Self {
            search,
            events: events.clone(),
            state: RwLock::new(FeedState {
                current_page: 0,
                has_more_pages: true,
                accumulated: Vec::new(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Clears accumulated photos and loads page 1.
    ///
    /// No-op while another fetch is in flight.
    pub async fn reset_and_load(&self) {
        if !self.begin_fetch() {
            debug!("Reset requested while a fetch is in flight, ignoring");
            return;
        }

        {
            let mut state = self.state.write().await;
            state.current_page = 0;
            state.has_more_pages = true;
            state.accumulated.clear();
        }

        self.load_page(1).await;
    }

    /// Loads the page after the last successfully loaded one.
    ///
    /// No-op while a fetch is in flight or when the last page was reached.
    pub async fn load_more(&self) {
        if !self.begin_fetch() {
            debug!("Load-more requested while a fetch is in flight, ignoring");
            return;
        }

        let next_page = {
            let state = self.state.read().await;
            if !state.has_more_pages {
                self.end_fetch();
                return;
            }
            state.current_page + 1
        };

        self.load_page(next_page).await;
    }

    /// Snapshot of the accumulated photo list.
    pub async fn photos(&self) -> Vec<Photo> {
        self.state.read().await.accumulated.clone()
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns true until the last page has been loaded.
    pub async fn has_more_pages(&self) -> bool {
        self.state.read().await.has_more_pages
    }

    /// Last successfully loaded page, 0 when nothing is loaded.
    pub async fn current_page(&self) -> u32 {
        self.state.read().await.current_page
    }

    /// Claims the in-flight slot. Returns false if a fetch is already running.
    fn begin_fetch(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn end_fetch(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    async fn load_page(&self, page: u32) {
        debug!(page, "Fetching feed page");
        self.send(FeedEvent::LoadingChanged(true));

        let result = self.search.search_photos(page).await;

        let outcome = match result {
            Ok(response) => Ok(self.apply_page(page, response).await),
            Err(error) => Err(error),
        };

        self.end_fetch();
        self.send(FeedEvent::LoadingChanged(false));

        match outcome {
            Ok(snapshot) => self.send(FeedEvent::PhotosUpdated(snapshot)),
            Err(error) => {
                warn!(page, error = %error, "Feed page fetch failed");
                self.send(FeedEvent::LoadFailed(error));
            }
        }
    }

    /// Commits a successful page and returns the accumulated snapshot.
    async fn apply_page(&self, page: u32, response: PhotoPage) -> Vec<Photo> {
        let mut state = self.state.write().await;
        if page == 1 {
            state.accumulated = response.photos;
        } else {
            state.accumulated.extend(response.photos);
        }
        state.current_page = page;
        state.has_more_pages = page < response.total_pages;
        debug!(
            page,
            total = state.accumulated.len(),
            has_more = state.has_more_pages,
            "Feed page applied"
        );
        state.accumulated.clone()
    }

    /// Event sends ignore a consumer that has gone away.
    fn send(&self, event: FeedEvent) {
        let _ = self.events.send(event);
    }
}
