//! Photo index client (Unsplash `search/photos`).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::{ImageRef, PhotoQuery, PhotoSearchResponse};
use super::{error_body, PhotoIndex};
use crate::config::ImageSearchConfig;
use crate::errors::ApiError;
use crate::observability::telemetry::sanitize_for_log;

pub struct UnsplashClient {
    client: Client,
    endpoint: String,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(config: &ImageSearchConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        })
    }

    /// Build the search URL. Credentials travel in a header, never here.
    pub fn search_url(&self, query: &PhotoQuery) -> Result<Url, ApiError> {
        let per_page = query.per_page.to_string();
        Url::parse_with_params(
            &format!("{}/search/photos", self.endpoint),
            &[
                ("query", query.query.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", query.orientation.as_str()),
            ],
        )
        .map_err(|e| ApiError::Network(format!("invalid search URL: {}", e)))
    }
}

#[async_trait]
impl PhotoIndex for UnsplashClient {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<ImageRef>, ApiError> {
        let url = self.search_url(query)?;
        debug!("Searching photos: {}", sanitize_for_log(&query.query));

        let mut request = self.client.get(url).header("Accept-Version", "v1");
        if let Some(ref key) = self.access_key {
            request = request.header("Authorization", format!("Client-ID {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        let body: PhotoSearchResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.image_refs())
    }
}
