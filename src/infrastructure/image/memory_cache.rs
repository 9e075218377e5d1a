//! In-memory LRU image cache bounded by entry count and total bytes.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

struct CachedImage {
    image: Arc<image::DynamicImage>,
    cost: u64,
}

struct CacheInner {
    entries: LruCache<String, CachedImage>,
    total_bytes: u64,
}

/// In-memory LRU cache for decoded images, keyed by source URL.
///
/// Inserts account the decoded pixel buffer size; when the byte budget is
/// exceeded, least-recently-used entries are evicted until the cache fits.
/// An image whose own size exceeds the budget is never stored.
pub struct MemoryImageCache {
    inner: RwLock<CacheInner>,
    max_bytes: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a cache bounded to `max_entries` entries and `max_bytes` total
    /// decoded bytes.
    #[must_use]
    pub fn new(max_entries: usize, max_bytes: u64) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: RwLock::new(CacheInner {
                entries: LruCache::new(cap),
                total_bytes: 0,
            }),
            max_bytes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Gets an image, promoting it in the LRU order.
    pub async fn get(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        let mut inner = self.inner.write().await;
        if let Some(cached) = inner.entries.get(url) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url, "Memory cache hit");
            Some(cached.image.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(url, "Memory cache miss");
            None
        }
    }

    /// Stores an image, evicting LRU entries to stay within both budgets.
    pub async fn put(&self, url: &str, image: Arc<image::DynamicImage>) {
        let cost = image.as_bytes().len() as u64;
        if cost > self.max_bytes {
            debug!(url, cost, "Image exceeds cache byte budget, not caching");
            return;
        }

        let mut inner = self.inner.write().await;
        if let Some((_, evicted)) = inner
            .entries
            .push(url.to_string(), CachedImage { image, cost })
        {
            inner.total_bytes -= evicted.cost;
        }
        inner.total_bytes += cost;

        while inner.total_bytes > self.max_bytes {
            let Some((evicted_url, evicted)) = inner.entries.pop_lru() else {
                break;
            };
            inner.total_bytes -= evicted.cost;
            debug!(url = %evicted_url, "Evicted image to respect byte budget");
        }
        trace!(url, cost, total = inner.total_bytes, "Image cached");
    }

    /// Removes a single entry.
    pub async fn evict(&self, url: &str) {
        let mut inner = self.inner.write().await;
        if let Some(evicted) = inner.entries.pop(url) {
            inner.total_bytes -= evicted.cost;
            debug!(url, "Evicted image from memory cache");
        }
    }

    /// Clears all entries.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.total_bytes = 0;
        debug!("Cleared memory image cache");
    }

    /// Current number of cached images, best-effort under concurrency.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.try_read().map(|i| i.entries.len()).unwrap_or(0)
    }

    /// Returns true if no images are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current total decoded bytes held, best-effort under concurrency.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.inner.try_read().map(|i| i.total_bytes).unwrap_or(0)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
            bytes: self.byte_size(),
        }
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
    /// Current total decoded bytes.
    pub bytes: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {} bytes, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.bytes, self.hit_rate, self.hits, self.misses
        )
    }
}
