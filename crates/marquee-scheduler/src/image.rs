//! Display image selection for single-release notifications.
//!
//! The image rotates with the day of the week: backdrop `weekday` if it
//! exists, else the last backdrop, then the same rule against posters,
//! then the large poster URL.

use marquee_catalog::{Image, Movie, MovieImages};

/// Pick the image for a release notification.
pub fn select_display_image(images: Option<&MovieImages>, fallback: &str, weekday: usize) -> String {
    let Some(images) = images else {
        return fallback.to_string();
    };

    pick(&images.backdrops, weekday)
        .or_else(|| pick(&images.posters, weekday))
        .unwrap_or(fallback)
        .to_string()
}

/// Display image for a movie, falling back to its large poster.
pub fn movie_display_image(movie: &Movie, weekday: usize) -> String {
    let fallback = movie.poster_urls.large.as_deref().unwrap_or_default();
    select_display_image(movie.images.as_ref(), fallback, weekday)
}

fn pick(images: &[Image], index: usize) -> Option<&str> {
    images
        .get(index)
        .or_else(|| images.last())
        .map(|image| image.url.as_str())
}
