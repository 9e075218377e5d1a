//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image caching and loading.
pub mod image;
/// Key-value persistence adapters.
pub mod storage;
/// Unsplash API client.
pub mod unsplash;

pub use config::{AppConfig, ImageCacheConfig, LogLevel, Orientation, SearchConfig};
pub use image::{CacheStats, HttpImageTransport, ImageLoader, MemoryImageCache};
pub use storage::FileKeyValueStore;
pub use unsplash::UnsplashClient;
