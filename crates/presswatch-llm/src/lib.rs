//! Presswatch Provider Layer
//!
//! Pluggable implementations of the `TextGenerator` trait from
//! `presswatch-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API integration
//!
//! # Examples
//!
//! ```
//! use presswatch_llm::MockProvider;
//! use presswatch_domain::traits::TextGenerator;
//!
//! let provider = MockProvider::new("TITLE: Hello");
//! let result = provider.generate("any prompt").unwrap();
//! assert_eq!(result, "TITLE: Hello");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use presswatch_domain::traits::{FailureKind, ProviderFailure, TextGenerator};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur while talking to a generative-text service
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The call did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderFailure for LlmError {
    fn kind(&self) -> FailureKind {
        match self {
            LlmError::Timeout => FailureKind::Timeout,
            LlmError::RateLimitExceeded => FailureKind::RateLimited,
            _ => FailureKind::Service,
        }
    }
}

/// What a scripted mock entry does when its needle matches
#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(FailureKind),
}

/// Mock provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Entries are
/// matched by substring against the incoming prompt, so tests can script
/// replies per segment without reproducing whole prompts.
///
/// # Examples
///
/// ```
/// use presswatch_llm::MockProvider;
/// use presswatch_domain::traits::{FailureKind, TextGenerator};
///
/// let mut provider = MockProvider::new("default reply");
/// provider.add_reply("part 2 of", "TITLE: From part two");
/// provider.fail_when_contains("part 3 of", FailureKind::Timeout);
///
/// assert_eq!(provider.generate("part 2 of 3 ...").unwrap(), "TITLE: From part two");
/// assert!(provider.generate("part 3 of 3 ...").is_err());
/// assert_eq!(provider.generate("anything else").unwrap(), "default reply");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    scripted: Arc<Mutex<Vec<(String, Script)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            scripted: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Reply with `response` whenever the prompt contains `needle`
    pub fn add_reply(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.scripted
            .lock()
            .unwrap()
            .push((needle.into(), Script::Reply(response.into())));
    }

    /// Fail with the given kind whenever the prompt contains `needle`
    pub fn fail_when_contains(&mut self, needle: impl Into<String>, kind: FailureKind) {
        self.scripted
            .lock()
            .unwrap()
            .push((needle.into(), Script::Fail(kind)));
    }

    /// Number of times `generate` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextGenerator for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let scripted = self.scripted.lock().unwrap();
        for (needle, script) in scripted.iter() {
            if prompt.contains(needle.as_str()) {
                return match script {
                    Script::Reply(response) => Ok(response.clone()),
                    Script::Fail(FailureKind::Timeout) => Err(LlmError::Timeout),
                    Script::Fail(FailureKind::RateLimited) => Err(LlmError::RateLimitExceeded),
                    Script::Fail(FailureKind::Service) => {
                        Err(LlmError::Other("scripted failure".to_string()))
                    }
                };
            }
        }

        Ok(self.default_response.clone())
    }
}
