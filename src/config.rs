//! Configuration management for Sahaay
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SahaayError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Sahaay
///
/// Holds the model backend settings, chat surface behavior, and the
/// default location used to bias map lookups.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Model backend configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Chat surface configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Default location for map grounding
    #[serde(default)]
    pub location: LocationConfig,
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Backend to use
    #[serde(rename = "type", default = "default_backend")]
    pub backend: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the hosted model API (prefer env var GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the generateContent endpoint,
    /// which allows tests to point the provider at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Timeout for model requests (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_backend() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model: default_model(),
            api_key: None,
            api_base: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Chat surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Hide suggested questions once the transcript reaches this many turns
    #[serde(default = "default_suggestion_cutoff")]
    pub suggestion_cutoff: usize,
}

fn default_suggestion_cutoff() -> usize {
    20
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            suggestion_cutoff: default_suggestion_cutoff(),
        }
    }
}

/// Default location configuration
///
/// Both values must be present for the location to take effect. Resolution
/// and range checking happen in [`crate::location::resolve`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SahaayError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SahaayError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(backend) = std::env::var("SAHAAY_BACKEND") {
            self.model.backend = backend;
        }

        if let Ok(model) = std::env::var("SAHAAY_MODEL") {
            self.model.model = model;
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.is_empty() {
                self.model.api_key = Some(api_key);
            }
        }

        if let Ok(timeout) = std::env::var("SAHAAY_REQUEST_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.model.request_timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SAHAAY_REQUEST_TIMEOUT: {}", timeout);
            }
        }

        if let Ok(latitude) = std::env::var("SAHAAY_LATITUDE") {
            if let Ok(value) = latitude.parse() {
                self.location.latitude = Some(value);
            } else {
                tracing::warn!("Invalid SAHAAY_LATITUDE: {}", latitude);
            }
        }

        if let Ok(longitude) = std::env::var("SAHAAY_LONGITUDE") {
            if let Ok(value) = longitude.parse() {
                self.location.longitude = Some(value);
            } else {
                tracing::warn!("Invalid SAHAAY_LONGITUDE: {}", longitude);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(pair) = &cli.location {
            match crate::location::Coordinates::parse(pair) {
                Ok(coords) => {
                    self.location.latitude = Some(coords.latitude);
                    self.location.longitude = Some(coords.longitude);
                }
                Err(e) => tracing::warn!("Ignoring --location: {}", e),
            }
        }

        if let Some(latitude) = cli.latitude {
            self.location.latitude = Some(latitude);
        }

        if let Some(longitude) = cli.longitude {
            self.location.longitude = Some(longitude);
        }
    }

    /// Validate the configuration
    ///
    /// Ensures the backend is known and values are within acceptable ranges.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.model.backend.is_empty() {
            return Err(SahaayError::Config("Model backend cannot be empty".to_string()).into());
        }

        let valid_backends = ["gemini"];
        if !valid_backends.contains(&self.model.backend.as_str()) {
            return Err(SahaayError::Config(format!(
                "Invalid model backend: {}. Must be one of: {}",
                self.model.backend,
                valid_backends.join(", ")
            ))
            .into());
        }

        if self.model.model.is_empty() {
            return Err(SahaayError::Config("Model name cannot be empty".to_string()).into());
        }

        if self.model.request_timeout_seconds == 0 {
            return Err(SahaayError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
