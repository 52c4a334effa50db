// src/error.rs

//! Unified error handling for the crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
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

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page count could not be discovered on the first listing page
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A single listing row could not be turned into a detail request
    #[error("Listing row error on {url}: {message}")]
    Listing { url: String, message: String },

    /// A mandatory detail field was absent
    #[error("Missing field '{field}' on {url}")]
    MissingField { field: &'static str, url: String },

    /// URL host is outside the allowed domains
    #[error("Refusing off-site URL: {url}")]
    OffSite { url: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }

    /// Create a listing row error.
    pub fn listing(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Listing {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing mandatory field error.
    pub fn missing(field: &'static str, url: impl Into<String>) -> Self {
        Self::MissingField {
            field,
            url: url.into(),
        }
    }
}
