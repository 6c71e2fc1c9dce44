//! Gemini provider implementation
//!
//! Integration with the Google Generative Language API
//! (`models/{model}:generateContent`). The provider performs exactly one
//! attempt per call; retry and backoff are composed by the caller around
//! the call, so ordering and quota decisions stay in one place.
//!
//! # Examples
//!
//! ```no_run
//! use presswatch_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::default_endpoint("gemini-1.5-flash", "api-key");
//! // `generate` is async; the TextGenerator impl wraps it for sync callers.
//! ```

use crate::LlmError;
use presswatch_domain::traits::TextGenerator as TextGeneratorTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default timeout for generation requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Google Generative Language API provider
///
/// Sends one prompt per request and concatenates the text parts of the
/// first returned candidate. Response content is treated as untrusted
/// free text; parsing it is the pipeline's job.
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// Response from the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API endpoint (e.g., "https://generativelanguage.googleapis.com")
    /// - `model`: model identifier (e.g., "gemini-1.5-flash")
    /// - `api_key`: API key passed as a query parameter
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a provider against the default public endpoint
    pub fn default_endpoint(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();
        self
    }

    /// Generate text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the request times out (`Timeout`)
    /// - the service rejects the call with HTTP 429 (`RateLimitExceeded`)
    /// - the model is unknown (`ModelNotAvailable`)
    /// - transport fails or the response carries no candidate text
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response carried no candidate text".to_string(),
            ));
        }

        Ok(text)
    }
}

impl TextGeneratorTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async call; callers that already hold a
        // runtime dispatch through spawn_blocking, where building a fresh
        // runtime is allowed.
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.generate(prompt).await })
    }
}
