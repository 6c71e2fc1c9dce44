//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use presswatch_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available provider profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Provider profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Remote service endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (the GEMINI_API_KEY env var takes precedence)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Archive database path override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            db_path: None,
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Markdown report format
    Markdown,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| CliError::Config("No config directory available".to_string()))?;
        Ok(base.join("presswatch").join("config.toml"))
    }

    /// Switch the active profile.
    pub fn switch_profile(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Unknown profile: {}", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles.get(&self.active_profile).ok_or_else(|| {
            CliError::Config(format!(
                "Active profile '{}' not found in config",
                self.active_profile
            ))
        })
    }

    /// Archive database path: profile override, else the user data dir.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Ok(profile) = self.get_active_profile() {
            if let Some(path) = &profile.db_path {
                return Ok(path.clone());
            }
        }
        let base = dirs::data_dir()
            .ok_or_else(|| CliError::Config("No data directory available".to_string()))?;
        Ok(base.join("presswatch").join("archive.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(default_profile(), Profile::default());
        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_endpoint() -> String {
    presswatch_llm::gemini::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    presswatch_llm::gemini::DEFAULT_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_default_profile() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.get_active_profile().is_ok());
    }

    #[test]
    fn test_switch_to_unknown_profile_fails() {
        let mut config = Config::default();
        assert!(config.switch_profile("missing").is_err());
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.active_profile, config.active_profile);
        assert_eq!(
            parsed.pipeline.max_chunk_size,
            config.pipeline.max_chunk_size
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str("active_profile = \"default\"").unwrap();
        assert!(parsed.settings.color);
        assert_eq!(parsed.pipeline.max_chunk_size, 50_000);
    }

    #[test]
    fn test_database_path_profile_override() {
        let mut config = Config::default();
        let custom = PathBuf::from("/tmp/custom.db");
        if let Some(profile) = config.profiles.get_mut("default") {
            profile.db_path = Some(custom.clone());
        }
        assert_eq!(config.database_path().unwrap(), custom);
    }
}
