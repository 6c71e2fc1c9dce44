//! Trait definitions for the remote generative-text service
//!
//! These traits define the boundary between the pipeline and the remote
//! service. Implementations live in the infrastructure layer
//! (presswatch-llm).

/// Coarse failure classes a provider error maps onto
///
/// The dispatcher uses the kind to decide whether a failed call is worth
/// retrying or backing off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The call did not complete in time
    Timeout,

    /// The service asked us to slow down
    RateLimited,

    /// Any other service or transport failure
    Service,
}

/// Implemented by provider error types so callers can classify failures
pub trait ProviderFailure: std::fmt::Display {
    /// The coarse failure class of this error
    fn kind(&self) -> FailureKind;
}

/// Trait for text generation against the remote service
///
/// Implemented by the infrastructure layer (presswatch-llm)
pub trait TextGenerator {
    /// Error type for generation operations
    type Error: ProviderFailure;

    /// Generate a completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
