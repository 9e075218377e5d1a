//! Favorites screen data source.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Photo;
use crate::domain::errors::FeedError;
use crate::domain::ports::PhotoSearchPort;

use super::FavoritesStore;

/// Loads the photos shown on the favorites screen.
///
/// The favorites screen shows the favorited subset of the first feed page,
/// in feed order.
pub struct FavoritesBrowser {
    search: Arc<dyn PhotoSearchPort>,
    favorites: Arc<FavoritesStore>,
}

impl FavoritesBrowser {
    /// Creates a browser over the given search transport and store.
    #[must_use]
    pub fn new(search: Arc<dyn PhotoSearchPort>, favorites: Arc<FavoritesStore>) -> Self {
        Self { search, favorites }
    }

    /// Fetches page 1 and keeps only favorited photos.
    ///
    /// # Errors
    /// Returns the fetch error verbatim; membership filtering cannot fail.
    pub async fn load(&self) -> Result<Vec<Photo>, FeedError> {
        let page = self.search.search_photos(1).await?;
        let ids = self.favorites.all_ids().await;
        let photos: Vec<Photo> = page
            .photos
            .into_iter()
            .filter(|photo| ids.contains(photo.id()))
            .collect();
        debug!(count = photos.len(), "Favorites loaded from feed");
        Ok(photos)
    }
}
