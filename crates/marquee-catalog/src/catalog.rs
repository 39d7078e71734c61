//! The catalog contract consumed by jobs.

use async_trait::async_trait;

use crate::{CatalogError, Movie, MovieSummary, Schedule, Theater};

/// Read-only access to theaters, movies and schedules.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List every theater.
    async fn list_theaters(&self) -> Result<Vec<Theater>, CatalogError>;

    /// List the movies currently playing in any theater.
    async fn list_now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Fetch full detail for a single movie.
    async fn get_movie_detail(
        &self,
        id: i64,
        include_trailer: bool,
        include_images: bool,
    ) -> Result<Movie, CatalogError>;

    /// Fetch the current schedule of a theater.
    async fn get_schedule(&self, theater_id: &str) -> Result<Schedule, CatalogError>;
}
