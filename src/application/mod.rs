//! Application layer with the core gallery services.

/// Feed, favorites, and navigation services.
pub mod services;

pub use services::{
    DetailNavigator, DetailView, FavoritesBrowser, FavoritesStore, FeedEvent, PhotoFeedLoader,
};
