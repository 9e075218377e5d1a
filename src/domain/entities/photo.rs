//! Photo entities returned by the search endpoint.

use serde::{Deserialize, Serialize};

/// Unique identifier for a photo. Stable across fetches within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub String);

impl PhotoId {
    /// Creates a new `PhotoId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PhotoId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Named image URL variants for one photo, from largest to smallest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    /// Unprocessed source image.
    pub raw: String,
    /// Full-resolution image.
    pub full: String,
    /// Regular-size image, used by the detail view.
    pub regular: String,
    /// Small image, used by grid cells.
    pub small: String,
    /// Thumbnail.
    pub thumb: String,
}

/// Profile image URL variants for a photo's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImageUrls {
    /// Small avatar.
    pub small: String,
    /// Medium avatar.
    pub medium: String,
    /// Large avatar.
    pub large: String,
}

/// The photographer credited for a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAuthor {
    /// Author's account id.
    pub id: String,
    /// Author's handle.
    pub username: String,
    /// Author's display name.
    pub name: String,
    /// Author's avatar URLs.
    pub profile_image: ProfileImageUrls,
}

/// An immutable photo record.
///
/// Equality and hashing consider only [`Photo::id`]; two fetches of the same
/// photo compare equal even if secondary fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    id: PhotoId,
    width: u32,
    height: u32,
    color: Option<String>,
    description: Option<String>,
    alt_description: Option<String>,
    urls: PhotoUrls,
    author: PhotoAuthor,
}

impl Photo {
    /// Creates a new photo record.
    #[must_use]
    pub fn new(
        id: impl Into<PhotoId>,
        width: u32,
        height: u32,
        urls: PhotoUrls,
        author: PhotoAuthor,
    ) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            color: None,
            description: None,
            alt_description: None,
            urls,
            author,
        }
    }

    /// Sets the dominant color hint.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the author-provided description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the generated alt description.
    #[must_use]
    pub fn with_alt_description(mut self, alt: impl Into<String>) -> Self {
        self.alt_description = Some(alt.into());
        self
    }

    /// Returns the photo id.
    #[must_use]
    pub const fn id(&self) -> &PhotoId {
        &self.id
    }

    /// Returns the pixel width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the pixel height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dominant color hint, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the author-provided description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the generated alt description, if any.
    #[must_use]
    pub fn alt_description(&self) -> Option<&str> {
        self.alt_description.as_deref()
    }

    /// Returns the image URL variants.
    #[must_use]
    pub const fn urls(&self) -> &PhotoUrls {
        &self.urls
    }

    /// Returns the credited author.
    #[must_use]
    pub const fn author(&self) -> &PhotoAuthor {
        &self.author
    }

    /// Width-over-height ratio used for grid cell layout.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    /// Best available caption: description, then alt description.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.description.as_deref().or(self.alt_description.as_deref())
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Photo {}

impl std::hash::Hash for Photo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPage {
    /// Photos in server order.
    pub photos: Vec<Photo>,
    /// Total number of matching photos.
    pub total: u32,
    /// Total number of pages available for the query.
    pub total_pages: u32,
}

impl PhotoPage {
    /// Creates a page of results.
    #[must_use]
    pub const fn new(photos: Vec<Photo>, total: u32, total_pages: u32) -> Self {
        Self {
            photos,
            total,
            total_pages,
        }
    }

    /// Returns the number of photos in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Returns true if this page carries no photos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
