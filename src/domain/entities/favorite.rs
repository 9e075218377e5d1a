//! Favorite-change event delivered to subscribers.

use super::PhotoId;

/// Emitted on every favorites mutation, including idempotent ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    /// The photo whose favorite state changed.
    pub photo_id: PhotoId,
    /// Membership after the mutation.
    pub is_favorite: bool,
}

impl FavoriteChange {
    /// Creates a change event.
    #[must_use]
    pub fn new(photo_id: impl Into<PhotoId>, is_favorite: bool) -> Self {
        Self {
            photo_id: photo_id.into(),
            is_favorite,
        }
    }
}
