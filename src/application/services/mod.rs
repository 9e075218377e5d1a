//! Core gallery services.

mod detail_navigator;
mod favorites_browser;
mod favorites_store;
mod feed_loader;

pub use detail_navigator::{DetailNavigator, DetailView};
pub use favorites_browser::FavoritesBrowser;
pub use favorites_store::FavoritesStore;
pub use feed_loader::{FeedEvent, PhotoFeedLoader};
