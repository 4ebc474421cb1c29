//! Error types for the New Relic API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use newrelic_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error(
        "API key cannot be empty. \
         Enable API access in your New Relic account settings to obtain one."
    )]
    EmptyApiKey,

    /// Host is invalid.
    #[error("Invalid host '{host}'. Expected a bare host name such as 'api.newrelic.com'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Port is invalid.
    #[error("Invalid port '{port}'. Expected a number between 1 and 65535.")]
    InvalidPort {
        /// The invalid port value that was provided.
        port: String,
    },

    /// Proxy URL is invalid.
    #[error(
        "Invalid proxy URL '{url}'. \
         Please provide a URL with scheme (e.g., 'http://proxy.local:8080')."
    )]
    InvalidProxyUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client for {site}: {reason}")]
    HttpClientBuild {
        /// The site URL the client was built for.
        site: String,
        /// Why construction failed.
        reason: String,
    },
}
