// src/error.rs

//! Unified error handling for the feed builder.

use std::fmt;

use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// No script element carries the embedded state marker
    #[error("Embedded state not found: no script starts with '{marker}'")]
    StateNotFound { marker: String },

    /// The embedded state could not be parsed after normalization
    #[error("Embedded state is not valid JSON: {0}")]
    StateParse(#[source] serde_json::Error),

    /// An expected field is missing from the parsed state
    #[error("Unexpected state shape at '{path}': {message}")]
    StateShape { path: String, message: String },

    /// Page fetch returned a non-success status
    #[error("Fetch of {url} failed with status {status}")]
    Fetch { url: String, status: u16 },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a state shape error for the given path.
    pub fn shape(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::StateShape {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from the transport layer.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Http(_))
    }
}
