//! Error types for the analysis pipeline

use presswatch_domain::traits::{FailureKind, ProviderFailure};
use thiserror::Error;

/// Failure of a single remote call
///
/// Dispatch failures are recoverable at segment granularity: they are
/// surfaced per segment and never propagate to sibling segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The call did not complete within the configured timeout
    #[error("Dispatch timeout")]
    Timeout,

    /// The remote service asked us to back off
    #[error("Rate limited by the remote service")]
    RateLimited,

    /// Any other remote or transport failure
    #[error("Service failure: {0}")]
    ServiceFailure(String),

    /// The batch was cancelled before this call ran
    #[error("Dispatch cancelled")]
    Cancelled,
}

impl DispatchError {
    /// Classify a provider error into a dispatch error
    pub fn from_failure<E: ProviderFailure>(error: &E) -> Self {
        match error.kind() {
            FailureKind::Timeout => DispatchError::Timeout,
            FailureKind::RateLimited => DispatchError::RateLimited,
            FailureKind::Service => DispatchError::ServiceFailure(error.to_string()),
        }
    }

    /// True when a retry policy may re-attempt this call
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DispatchError::Cancelled)
    }
}

/// Errors that abort an analysis before any dispatch happens
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Input text exceeds the configured maximum
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswatch_llm::LlmError;

    #[test]
    fn test_from_failure_mapping() {
        assert_eq!(
            DispatchError::from_failure(&LlmError::Timeout),
            DispatchError::Timeout
        );
        assert_eq!(
            DispatchError::from_failure(&LlmError::RateLimitExceeded),
            DispatchError::RateLimited
        );
        assert!(matches!(
            DispatchError::from_failure(&LlmError::Other("boom".to_string())),
            DispatchError::ServiceFailure(_)
        ));
    }

    #[test]
    fn test_cancelled_is_not_retryable() {
        assert!(DispatchError::Timeout.is_retryable());
        assert!(DispatchError::RateLimited.is_retryable());
        assert!(!DispatchError::Cancelled.is_retryable());
    }
}
