//! Domain entity definitions.

mod favorite;
mod image;
mod photo;

pub use favorite::FavoriteChange;
pub use image::ImageSource;
pub use photo::{Photo, PhotoAuthor, PhotoId, PhotoPage, PhotoUrls, ProfileImageUrls};
