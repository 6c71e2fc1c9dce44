//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key available
    #[error("No API key. Pass --api-key, set GEMINI_API_KEY, or add api_key to the active profile.")]
    MissingApiKey,

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analyze(#[from] presswatch_pipeline::AnalyzeError),

    /// Archive error
    #[error("Archive error: {0}")]
    Store(#[from] presswatch_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
