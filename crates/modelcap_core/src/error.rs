//! Error types for model capability resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while validating provider input or loading model data.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid router name: {0}")]
    InvalidRouterName(String),

    #[error("Invalid API format: {0} (expected anthropic, openai, gemini or openrouter)")]
    InvalidFormat(String),

    #[error("Invalid API provider: {0}")]
    InvalidProvider(String),

    #[error("Invalid reasoning effort: {0} (expected low, medium or high)")]
    InvalidReasoningEffort(String),

    #[error("Model not found for provider {provider}: {model}")]
    UnknownModel { provider: String, model: String },

    #[error("No built-in model catalog for provider: {0}")]
    UnknownCatalogProvider(String),

    #[error("Missing required option for {provider}: {field}")]
    MissingOption { provider: String, field: String },

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Unsupported settings file format: {0}")]
    UnsupportedSettingsFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ModelError {
    /// Whether this error stems from bad user input rather than the environment.
    ///
    /// Configuration errors are surfaced to the user and never retried.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
