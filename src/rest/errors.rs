//! Resource-specific error types for REST API operations.
//!
//! This module contains [`ResourceError`], the error type of every operation
//! in the resource layer: relationship resolution, path building, finds and
//! creates.
//!
//! # Error Handling
//!
//! Collaborator errors pass through untouched:
//!
//! - Transport failures and non-2xx statuses arrive as [`ResourceError::Http`]
//! - Undecodable bodies arrive as [`ResourceError::Codec`]
//!
//! Everything else is raised by the resource layer itself, before or after
//! the single HTTP call an operation makes.
//!
//! # Example
//!
//! ```rust,ignore
//! use newrelic_api::clients::ResponseKind;
//! use newrelic_api::rest::{ResourceError, Selector};
//!
//! match api.resource("NewRelicApi::Account")?.find(Selector::First, Params::new()).await {
//!     Ok(found) => println!("Found {} accounts", found.len()),
//!     Err(ResourceError::MissingApiKey) => println!("Set an API key first"),
//!     Err(ResourceError::Http(e)) if e.kind() == Some(ResponseKind::Forbidden) => {
//!         println!("API key rejected");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::rest::codec::CodecError;
use thiserror::Error;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use newrelic_api::rest::ResourceError;
///
/// let error = ResourceError::MissingPathParameter {
///     template: "/accounts/:account_id/".to_string(),
///     parameter: "account_id".to_string(),
/// };
/// assert!(error.to_string().contains("account_id"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No API key is configured. Raised before any request is built.
    #[error("api_key required")]
    MissingApiKey,

    /// A path template placeholder had no value (or a `null` value).
    #[error("Missing value for ':{parameter}' in path template '{template}'")]
    MissingPathParameter {
        /// The template being resolved.
        template: String,
        /// The placeholder without a value.
        parameter: String,
    },

    /// A relationship named a type that is not registered in either the
    /// declaring type or its namespace.
    #[error("Unknown resource type '{name}' (looked in '{namespace}')")]
    UnknownResourceType {
        /// The type name derived from the relationship.
        name: String,
        /// The namespaces that were searched, most specific first.
        namespace: String,
    },

    /// The instance's type does not declare the requested relationship.
    #[error("{resource} has no relationship named '{relationship}'")]
    UndeclaredRelationship {
        /// The qualified name of the instance's type.
        resource: String,
        /// The requested relationship.
        relationship: String,
    },

    /// A qualified type name is not registered.
    #[error("Resource type '{name}' is not registered")]
    UnregisteredResource {
        /// The qualified name that was looked up.
        name: String,
    },

    /// A `First`, `One` or `Id` find returned no records.
    #[error("{resource} ({selector}) not found")]
    NotFound {
        /// The qualified name of the type that was searched.
        resource: String,
        /// The selector that matched nothing.
        selector: String,
    },

    /// A resource connection could not be rebuilt from the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A response body could not be decoded, or attributes could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ResourceError {
    /// Returns the HTTP status code if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(HttpError::Response(e)) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    ///
    /// Useful for debugging and error reporting.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
