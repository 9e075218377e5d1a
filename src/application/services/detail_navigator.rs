//! Cursor over an ordered photo list for the detail screen.

use std::sync::Arc;

use crate::domain::entities::Photo;

use super::FavoritesStore;

/// Snapshot handed to the detail screen after every cursor operation.
#[derive(Debug, Clone)]
pub struct DetailView {
    /// The photo under the cursor.
    pub photo: Photo,
    /// Whether it is currently favorited.
    pub is_favorite: bool,
}

/// Thin cursor over an immutable, ordered photo list.
///
/// Movement past either end is a no-op; the cursor always points at a photo.
pub struct DetailNavigator {
    photos: Vec<Photo>,
    current_index: usize,
    favorites: Arc<FavoritesStore>,
}

impl DetailNavigator {
    /// Creates a navigator positioned at `start_index`.
    ///
    /// Returns `None` for an empty list. A start index past the end is
    /// clamped to the last photo.
    #[must_use]
    pub fn new(
        photos: Vec<Photo>,
        start_index: usize,
        favorites: Arc<FavoritesStore>,
    ) -> Option<Self> {
        if photos.is_empty() {
            return None;
        }
        let current_index = start_index.min(photos.len() - 1);
        Some(Self {
            photos,
            current_index,
            favorites,
        })
    }

    /// The photo under the cursor.
    #[must_use]
    pub fn current(&self) -> &Photo {
        &self.photos[self.current_index]
    }

    /// The cursor position, 0-based.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_index
    }

    /// Number of photos in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Always false: construction rejects empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Returns true if a photo follows the cursor.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.photos.len()
    }

    /// Returns true if a photo precedes the cursor.
    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Advances the cursor, if possible, and returns the view to show.
    pub async fn next(&mut self) -> DetailView {
        if self.can_go_next() {
            self.current_index += 1;
        }
        self.current_view().await
    }

    /// Moves the cursor back, if possible, and returns the view to show.
    pub async fn previous(&mut self) -> DetailView {
        if self.can_go_previous() {
            self.current_index -= 1;
        }
        self.current_view().await
    }

    /// Flips the favorite state of the current photo.
    pub async fn toggle_favorite(&self) -> DetailView {
        let photo = self.current().clone();
        let is_favorite = self.favorites.toggle(photo.id()).await;
        DetailView { photo, is_favorite }
    }

    /// The view for the photo under the cursor.
    pub async fn current_view(&self) -> DetailView {
        let photo = self.current().clone();
        let is_favorite = self.favorites.contains(photo.id()).await;
        DetailView { photo, is_favorite }
    }
}
