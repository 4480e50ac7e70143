//! Text model client (Gemini `generateContent`).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{error_body, TextModel};
use crate::config::TextModelConfig;
use crate::errors::ApiError;

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &TextModelConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, ApiError> {
        let url = self.url();
        debug!("Sending generateContent request to {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt));
        if let Some(ref key) = self.api_key {
            request = request.header("x-goog-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        body.text()
            .ok_or_else(|| ApiError::Parse("response contained no text".to_string()))
    }
}
