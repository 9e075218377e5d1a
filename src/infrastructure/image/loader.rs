//! Image resolution pipeline: cache, then a single shared network fetch.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageSource;
use crate::domain::ports::ImageFetchPort;
use crate::infrastructure::config::ImageCacheConfig;

use super::memory_cache::{CacheStats, MemoryImageCache};

type ResolveResult = Option<Arc<image::DynamicImage>>;

/// Resolves image URLs to decoded images with bounded caching.
///
/// Every failure mode (invalid URL, transport, HTTP status, decode) degrades
/// to `None`; the UI shows a placeholder and a later resolve refetches.
/// Concurrent resolves of the same URL share one network fetch.
pub struct ImageLoader {
    cache: MemoryImageCache,
    transport: Arc<dyn ImageFetchPort>,
    pending: Mutex<HashMap<String, broadcast::Sender<ResolveResult>>>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}

enum Role {
    Fetch(broadcast::Sender<ResolveResult>),
    Wait(broadcast::Receiver<ResolveResult>),
}

impl ImageLoader {
    /// Creates a loader over the given transport.
    #[must_use]
    pub fn new(config: &ImageCacheConfig, transport: Arc<dyn ImageFetchPort>) -> Self {
        Self {
            cache: MemoryImageCache::new(config.max_entries, config.max_bytes),
            transport,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a URL to a decoded image, or `None` on any failure.
    pub async fn resolve(&self, url: &str) -> ResolveResult {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            debug!(url, "Invalid image URL");
            return None;
        };

        if let Some(image) = self.cache.get(url).await {
            trace!(url, source = %ImageSource::MemoryCache, "Image resolved");
            return Some(image);
        }

        let role = {
            let mut pending = self.pending.lock().await;
            if let Some(tx) = pending.get(url) {
                Role::Wait(tx.subscribe())
            } else {
                let (tx, _) = broadcast::channel(1);
                pending.insert(url.to_string(), tx.clone());
                Role::Fetch(tx)
            }
        };

        match role {
            Role::Wait(mut rx) => {
                let result = rx.recv().await.ok().flatten();
                trace!(url, source = %ImageSource::Coalesced, "Image resolved");
                result
            }
            Role::Fetch(tx) => {
                let result = self.fetch_and_decode(url, &parsed).await;
                if let Some(image) = &result {
                    self.cache.put(url, image.clone()).await;
                }
                self.pending.lock().await.remove(url);
                let _ = tx.send(result.clone());
                result
            }
        }
    }

    /// Fire-and-forget warm-up of a batch of URLs.
    pub fn prefetch(self: Arc<Self>, urls: Vec<String>) {
        for url in urls {
            let loader = Arc::clone(&self);
            tokio::spawn(async move {
                let _ = loader.resolve(&url).await;
            });
        }
    }

    /// Clears the cache.
    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    /// Returns cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn fetch_and_decode(&self, url: &str, parsed: &reqwest::Url) -> ResolveResult {
        let bytes = match self.transport.fetch(parsed).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(url, error = %error, "Image fetch failed");
                return None;
            }
        };

        let decoded =
            tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;

        match decoded {
            Ok(Ok(image)) => {
                trace!(url, source = %ImageSource::Network, "Image resolved");
                Some(Arc::new(image))
            }
            Ok(Err(error)) => {
                debug!(url, error = %error, "Image decode failed");
                None
            }
            Err(error) => {
                warn!(url, error = %error, "Image decode task panicked");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FetchError;
    use crate::domain::ports::mocks::MockImageFetch;
    use bytes::Bytes;

    const URL: &str = "https://images.example.com/photo.png";

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let image = image::DynamicImage::new_rgb8(width, height);
        let mut buffer = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer.into_inner())
    }

    fn make_loader(mock: MockImageFetch) -> (Arc<ImageLoader>, Arc<MockImageFetch>) {
        let transport = Arc::new(mock);
        let loader = Arc::new(ImageLoader::new(
            &ImageCacheConfig::default(),
            transport.clone(),
        ));
        (loader, transport)
    }

    #[tokio::test]
    async fn test_second_resolve_hits_cache() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Ok(png_bytes(4, 4)));
        let (loader, transport) = make_loader(mock);

        assert!(loader.resolve(URL).await.is_some());
        assert!(loader.resolve(URL).await.is_some());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_fetch() {
        let (loader, transport) = make_loader(MockImageFetch::new());

        assert!(loader.resolve("not a url").await.is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_are_not_cached() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Ok(Bytes::from_static(b"these are not pixels")));
        let (loader, transport) = make_loader(mock);

        assert!(loader.resolve(URL).await.is_none());
        assert!(loader.resolve(URL).await.is_none());
        // Nothing cached, so each resolve refetched.
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_none() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Err(FetchError::Network("connection reset".into())));
        let (loader, _transport) = make_loader(mock);

        assert!(loader.resolve(URL).await.is_none());
    }

    #[tokio::test]
    async fn test_http_failure_degrades_to_none() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Err(FetchError::Http(404)));
        let (loader, _transport) = make_loader(mock);

        assert!(loader.resolve(URL).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_fetch() {
        let (mock, gate) = MockImageFetch::gated();
        mock.insert(URL, Ok(png_bytes(4, 4)));
        let (loader, transport) = make_loader(mock);

        let first = tokio::spawn({
            let loader = loader.clone();
            async move { loader.resolve(URL).await }
        });
        let second = tokio::spawn({
            let loader = loader.clone();
            async move { loader.resolve(URL).await }
        });
        tokio::task::yield_now().await;

        gate.notify_one();
        assert!(first.await.unwrap().is_some());
        assert!(second.await.unwrap().is_some());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prefetch_warms_cache() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Ok(png_bytes(4, 4)));
        let (loader, transport) = make_loader(mock);

        loader.clone().prefetch(vec![URL.to_string()]);
        for _ in 0..100 {
            if transport.call_count() == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        // Either a cache hit or a coalesced wait; never a second fetch.
        assert!(loader.resolve(URL).await.is_some());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let mock = MockImageFetch::new();
        mock.insert(URL, Ok(png_bytes(4, 4)));
        let (loader, transport) = make_loader(mock);

        assert!(loader.resolve(URL).await.is_some());
        loader.clear().await;
        assert!(loader.resolve(URL).await.is_some());
        assert_eq!(transport.call_count(), 2);
    }
}
