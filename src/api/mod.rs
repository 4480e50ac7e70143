//! Remote content service
//!
//! `ContentProvider` is the seam the generation orchestrator talks to. The
//! shipped implementation, `RemoteContentService`, validates notes with a
//! text model and stands in for image generation by picking a random photo
//! from a keyword search. A real generative backend can replace it without
//! touching the orchestrator.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod gemini;
pub mod query;
pub mod types;
pub mod unsplash;

use crate::config::{Config, ImageSearchConfig};
use crate::errors::ApiError;
use crate::observability::telemetry::{redact_secrets, sanitize_for_log};
use crate::random::{thread_random, SharedRandom};
use gemini::GeminiClient;
use types::{ImageRef, PhotoQuery};
use unsplash::UnsplashClient;

/// Pluggable source of validation verdicts and images.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Whether free-text notes describe architectural content.
    async fn classify(&self, text: &str) -> bool;

    /// An image for `query`. Providers may fail; the orchestrator treats any
    /// error as a failed generation.
    async fn fetch_image(&self, query: &str) -> anyhow::Result<ImageRef>;
}

/// Trait abstraction over the text model, enabling test mocking.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Trait abstraction over the photo index, enabling test mocking.
#[async_trait]
pub trait PhotoIndex: Send + Sync {
    async fn search(&self, query: &PhotoQuery) -> Result<Vec<ImageRef>, ApiError>;
}

/// `ContentProvider` over a remote text model and photo index.
///
/// Never returns an error: classification fails open and image search
/// falls back to a fixed reference.
pub struct RemoteContentService {
    text_model: Arc<dyn TextModel>,
    photos: Arc<dyn PhotoIndex>,
    rng: SharedRandom,
    per_page: u32,
    orientation: String,
    fallback_image: ImageRef,
}

impl RemoteContentService {
    pub fn new(
        text_model: Arc<dyn TextModel>,
        photos: Arc<dyn PhotoIndex>,
        rng: SharedRandom,
        search: &ImageSearchConfig,
    ) -> Self {
        Self {
            text_model,
            photos,
            rng,
            per_page: search.per_page.clamp(1, 20),
            orientation: search.orientation.clone(),
            fallback_image: search.fallback_image.clone(),
        }
    }

    /// Build the service with the real HTTP backends.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let text_model = Arc::new(GeminiClient::new(&config.text_model)?);
        let photos = Arc::new(UnsplashClient::new(&config.image_search)?);
        Ok(Self::new(
            text_model,
            photos,
            thread_random(),
            &config.image_search,
        ))
    }

    pub fn fallback_image(&self) -> &str {
        &self.fallback_image
    }

    async fn search_random(&self, query: &str) -> Result<ImageRef, ApiError> {
        let request = PhotoQuery {
            query: query.to_string(),
            per_page: self.per_page,
            orientation: self.orientation.clone(),
        };
        let candidates = self.photos.search(&request).await?;
        if candidates.is_empty() {
            return Err(ApiError::EmptyResults);
        }
        let pick = self.rng.index(candidates.len());
        debug!("Picked image {} of {}", pick + 1, candidates.len());
        Ok(candidates[pick].clone())
    }
}

#[async_trait]
impl ContentProvider for RemoteContentService {
    async fn classify(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return true;
        }

        match self
            .text_model
            .generate_text(&query::validation_prompt(text))
            .await
        {
            Ok(reply) => {
                let valid = query::is_valid_verdict(&reply);
                debug!(valid, "Validation verdict: {}", sanitize_for_log(reply.trim()));
                valid
            }
            Err(e) => {
                // Fail open: a validation outage must not block generation.
                warn!(
                    "Validation check failed, allowing input: {}",
                    redact_secrets(&sanitize_for_log(&e.to_string()))
                );
                true
            }
        }
    }

    async fn fetch_image(&self, query: &str) -> anyhow::Result<ImageRef> {
        match self.search_random(query).await {
            Ok(image) => Ok(image),
            Err(e) => {
                warn!(
                    "Image search failed, using fallback image: {}",
                    redact_secrets(&sanitize_for_log(&e.to_string()))
                );
                Ok(self.fallback_image.clone())
            }
        }
    }
}

/// Read an error response body for diagnostics, capped to keep logs short.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    const MAX_ERROR_BODY: usize = 512;
    let mut text = response.text().await.unwrap_or_default();
    if text.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
