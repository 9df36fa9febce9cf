//! Error types for Sahaay

use thiserror::Error;

/// Main error type for Sahaay operations
#[derive(Error, Debug)]
pub enum SahaayError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model provider errors (construction, transport setup)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Location parsing or range errors
    #[error("Location error: {0}")]
    Location(String),

    /// Session bookkeeping errors
    #[error("Session error: {0}")]
    Session(String),

    /// Submitted message was empty or whitespace-only
    #[error("Message is empty")]
    EmptyMessage,

    /// A reply is already being generated for this session
    #[error("A reply is already in progress")]
    Busy,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Sahaay operations
pub type Result<T> = anyhow::Result<T>;
