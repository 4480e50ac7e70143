//! Shared fakes for the unit tests.

#![allow(dead_code)]

use archvision::api::types::{ImageRef, PhotoQuery};
use archvision::api::{ContentProvider, PhotoIndex, TextModel};
use archvision::errors::ApiError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Provider that accepts everything and echoes the query back as the image.
#[derive(Default)]
pub struct CountingProvider {
    pub classify_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub reject: bool,
    pub fail_fetch: AtomicBool,
    pub delay: Option<Duration>,
}

impl CountingProvider {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Make later fetches fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.fail_fetch.store(failing, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn classifications(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for CountingProvider {
    async fn classify(&self, _text: &str) -> bool {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        !self.reject
    }

    async fn fetch_image(&self, query: &str) -> anyhow::Result<ImageRef> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            anyhow::bail!("photo service unreachable");
        }
        Ok(format!("https://img.test/{}", query.replace(' ', "+")))
    }
}

/// Text model with a canned reply (or a canned failure).
pub struct ScriptedModel {
    pub reply: Result<String, String>,
    pub calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(ApiError::Network)
    }
}

/// Photo index returning a fixed list (or a failure).
pub struct FixedPhotos {
    pub results: Result<Vec<ImageRef>, u16>,
    pub calls: AtomicUsize,
}

impl FixedPhotos {
    pub fn with(results: &[&str]) -> Self {
        Self {
            results: Ok(results.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            results: Err(code),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PhotoIndex for FixedPhotos {
    async fn search(&self, _query: &PhotoQuery) -> Result<Vec<ImageRef>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.results {
            Ok(list) => Ok(list.clone()),
            Err(code) => Err(ApiError::HttpStatus {
                status: *code,
                message: "rate limited".to_string(),
            }),
        }
    }
}
