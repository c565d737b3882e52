//! # Client Error Types
//!
//! Error types for configuration, persistence and dataset fetches.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Persistence   │  │        Fetch            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Io             │  │  Request (network,      │ │
//! │  │  InvalidUrl     │  │  TomlParse      │  │    HTTP status)         │ │
//! │  │  ConfigLoad…    │  │  TomlWrite      │  │  Decode (non-JSON body) │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch errors never reach the user as errors: the [`crate::browser`]
//! logs and swallows them, leaving an empty result list on screen.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Base URL is not an http(s) URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save a config or preference file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// Network failure or non-success HTTP status.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not a JSON array of the expected type.
    #[error("Could not decode {dataset} response: {reason}")]
    Decode { dataset: String, reason: String },
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}
