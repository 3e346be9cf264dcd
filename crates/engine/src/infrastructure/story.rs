//! HTTP client for the story generation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{GeneratorError, StoryPort};

/// Default story service base URL.
pub const DEFAULT_STORY_BASE_URL: &str = "http://localhost:8600";

/// Default completion model.
pub const DEFAULT_STORY_MODEL: &str = "anthropic.claude-v2";

/// Client for a prompt-completion API: POST `{base}/complete` with a prompt
/// and token budget, narrative text back in the `completion` field.
#[derive(Clone)]
pub struct StoryApiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl StoryApiClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        // Completion requests can be slow; allow up to two minutes.
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create client from `STORY_API_URL` / `STORY_MODEL`, falling back to
    /// defaults if not set.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STORY_API_URL").unwrap_or_else(|_| DEFAULT_STORY_BASE_URL.to_string());
        let model =
            std::env::var("STORY_MODEL").unwrap_or_else(|_| DEFAULT_STORY_MODEL.to_string());
        Self::new(&base_url, &model)
    }
}

impl Default for StoryApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_STORY_BASE_URL, DEFAULT_STORY_MODEL)
    }
}

#[async_trait]
impl StoryPort for StoryApiClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GeneratorError> {
        let api_request = CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            max_tokens_to_sample: max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/complete", self.base_url))
            .json(&api_request)
            .send()
            .await
            .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?;
            return Err(GeneratorError::RequestFailed(error_text));
        }

        let api_response: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        Ok(api_response.completion)
    }
}

// =============================================================================
// Completion API types
// =============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    max_tokens_to_sample: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}
