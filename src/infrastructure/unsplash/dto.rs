use serde::Deserialize;

use crate::domain::entities::{Photo, PhotoAuthor, PhotoPage, PhotoUrls, ProfileImageUrls};

/// Unsplash search response structure.
#[derive(Debug, Deserialize)]
pub struct SearchResponseDto {
    /// Matching photos for the requested page.
    pub results: Vec<PhotoDto>,
    /// Total number of matches.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

/// Unsplash photo structure.
#[derive(Debug, Deserialize)]
pub struct PhotoDto {
    /// Photo id.
    pub id: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Dominant color hex string.
    #[serde(default)]
    pub color: Option<String>,
    /// Author-provided description.
    #[serde(default)]
    pub description: Option<String>,
    /// Generated alt description.
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Image URL variants.
    pub urls: PhotoUrlsDto,
    /// Credited author.
    pub user: UserDto,
}

/// Unsplash image URL variants.
#[derive(Debug, Deserialize)]
pub struct PhotoUrlsDto {
    /// Unprocessed source image.
    pub raw: String,
    /// Full-resolution image.
    pub full: String,
    /// Regular-size image.
    pub regular: String,
    /// Small image.
    pub small: String,
    /// Thumbnail.
    pub thumb: String,
}

/// Unsplash user structure.
#[derive(Debug, Deserialize)]
pub struct UserDto {
    /// User id.
    pub id: String,
    /// User handle.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar URLs.
    pub profile_image: ProfileImageDto,
}

/// Unsplash profile image variants.
#[derive(Debug, Deserialize)]
pub struct ProfileImageDto {
    /// Small avatar.
    pub small: String,
    /// Medium avatar.
    pub medium: String,
    /// Large avatar.
    pub large: String,
}

impl From<PhotoDto> for Photo {
    fn from(dto: PhotoDto) -> Self {
        let mut photo = Self::new(
            dto.id,
            dto.width,
            dto.height,
            PhotoUrls {
                raw: dto.urls.raw,
                full: dto.urls.full,
                regular: dto.urls.regular,
                small: dto.urls.small,
                thumb: dto.urls.thumb,
            },
            PhotoAuthor {
                id: dto.user.id,
                username: dto.user.username,
                name: dto.user.name,
                profile_image: ProfileImageUrls {
                    small: dto.user.profile_image.small,
                    medium: dto.user.profile_image.medium,
                    large: dto.user.profile_image.large,
                },
            },
        );
        if let Some(color) = dto.color {
            photo = photo.with_color(color);
        }
        if let Some(description) = dto.description {
            photo = photo.with_description(description);
        }
        if let Some(alt) = dto.alt_description {
            photo = photo.with_alt_description(alt);
        }
        photo
    }
}

impl From<SearchResponseDto> for PhotoPage {
    fn from(dto: SearchResponseDto) -> Self {
        Self::new(
            dto.results.into_iter().map(Photo::from).collect(),
            dto.total,
            dto.total_pages,
        )
    }
}
