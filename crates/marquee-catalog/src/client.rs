//! HTTP JSON catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Catalog, CatalogError, Movie, MovieSummary, Schedule, Theater};

/// Client for the catalog service's JSON API.
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "catalog request");

        let response = self.http.get(&url).query(query).send().await?;
        Self::handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, CatalogError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(endpoint.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn list_theaters(&self) -> Result<Vec<Theater>, CatalogError> {
        self.get_json("/theaters", &[]).await
    }

    async fn list_now_playing(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        self.get_json("/movies/now-playing", &[]).await
    }

    async fn get_movie_detail(
        &self,
        id: i64,
        include_trailer: bool,
        include_images: bool,
    ) -> Result<Movie, CatalogError> {
        self.get_json(
            &format!("/movies/{}", id),
            &[
                ("include_trailer", include_trailer.to_string()),
                ("include_images", include_images.to_string()),
            ],
        )
        .await
    }

    async fn get_schedule(&self, theater_id: &str) -> Result<Schedule, CatalogError> {
        self.get_json(&format!("/theaters/{}/schedule", theater_id), &[])
            .await
    }
}
