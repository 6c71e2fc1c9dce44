//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum segment size (characters)
    pub max_chunk_size: usize,

    /// Maximum time for a single remote call (seconds)
    pub dispatch_timeout_secs: u64,

    /// Number of remote calls allowed in flight at once (1 = sequential)
    pub parallelism: usize,

    /// Tokens recognized in page-marker lines (e.g. "=== SEITE 3 ===")
    pub marker_tokens: Vec<String>,
}

impl PipelineConfig {
    /// Get the per-call dispatch timeout as a Duration
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.max_chunk_size > self.max_text_length {
            return Err("max_chunk_size cannot exceed max_text_length".to_string());
        }
        if self.dispatch_timeout_secs == 0 {
            return Err("dispatch_timeout_secs must be greater than 0".to_string());
        }
        if self.parallelism == 0 {
            return Err("parallelism must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 4_000_000,
            max_chunk_size: 50_000,
            dispatch_timeout_secs: 120,
            parallelism: 1,
            marker_tokens: vec!["SEITE".to_string(), "PAGE".to_string()],
        }
    }
}

impl PipelineConfig {
    /// Fast preset: smaller segments, shorter timeouts, parallel dispatch
    pub fn fast() -> Self {
        Self {
            max_text_length: 1_000_000,
            max_chunk_size: 20_000,
            dispatch_timeout_secs: 60,
            parallelism: 4,
            ..Self::default()
        }
    }

    /// Thorough preset: large segments, generous timeouts, sequential
    pub fn thorough() -> Self {
        Self {
            max_text_length: 4_000_000,
            max_chunk_size: 100_000,
            dispatch_timeout_secs: 300,
            parallelism: 1,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(PipelineConfig::fast().validate().is_ok());
        assert!(PipelineConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut config = PipelineConfig::default();
        config.max_chunk_size = 0;
        assert!(config.validate().is_err());

        config.max_chunk_size = config.max_text_length + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_parallelism() {
        let mut config = PipelineConfig::default();
        config.parallelism = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.max_chunk_size, parsed.max_chunk_size);
        assert_eq!(config.marker_tokens, parsed.marker_tokens);
    }
}
