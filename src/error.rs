// src/error.rs

//! Unified error handling for the availability scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Durable blob store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

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

    /// Voyage page could not be fetched
    #[error("Fetch error for {voyage}: {message}")]
    Fetch { voyage: String, message: String },

    /// Voyage page could not be turned into availability
    #[error("Extract error for {voyage}: {message}")]
    Extract { voyage: String, message: String },
}

impl AppError {
    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error with the voyage reference as context.
    pub fn fetch(voyage: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            voyage: voyage.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error with the voyage reference as context.
    pub fn extract(voyage: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            voyage: voyage.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error is scoped to a single voyage.
    ///
    /// Per-voyage errors are skipped by the scraper; everything else
    /// propagates to the caller of a run.
    pub fn is_per_voyage(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Extract { .. } | Self::Http(_))
    }
}
