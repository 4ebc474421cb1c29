//! HTTP-specific error types for the New Relic API client.
//!
//! This module contains error types for HTTP operations, including response
//! errors, request validation failures and network errors.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Status codes are classified by [`HttpResponseError::kind`] so callers can
//! tell a forbidden key from a missing resource without matching on numbers.
//!
//! # Example
//!
//! ```rust,ignore
//! use newrelic_api::clients::{HttpError, ResponseKind};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) if e.kind() == ResponseKind::Forbidden => {
//!         println!("API key rejected");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Classification of a non-successful HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// 3xx: the server redirected the request.
    Redirect,
    /// 400: the request was malformed.
    BadRequest,
    /// 401: no or invalid credentials.
    Unauthorized,
    /// 403: the API key may not access this resource.
    Forbidden,
    /// 404: the resource does not exist.
    NotFound,
    /// 405: the resource does not support the method.
    MethodNotAllowed,
    /// 409: the resource conflicts with existing state.
    Conflict,
    /// 410: the resource was removed.
    Gone,
    /// 422: the server rejected the submitted attributes.
    Unprocessable,
    /// Any other 4xx status.
    Client,
    /// 5xx: the server failed.
    Server,
    /// Anything else (1xx, out-of-range codes).
    Unknown,
}

impl ResponseKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            300..=399 => Self::Redirect,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            409 => Self::Conflict,
            410 => Self::Gone,
            422 => Self::Unprocessable,
            402 | 406..=408 | 411..=421 | 423..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }
}

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use newrelic_api::clients::{HttpResponseError, ResponseKind};
///
/// let error = HttpResponseError {
///     code: 403,
///     message: "Forbidden".to_string(),
///     error_reference: Some("abc-123".to_string()),
///     location: None,
/// };
///
/// assert_eq!(error.kind(), ResponseKind::Forbidden);
/// assert!(error.to_string().contains("403"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or the status reason when the body is empty.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
    /// The `Location` header for redirects.
    pub location: Option<String>,
}

impl HttpResponseError {
    /// Returns the classification of this error's status code.
    #[must_use]
    pub const fn kind(&self) -> ResponseKind {
        ResponseKind::from_status(self.code)
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST requests
/// - Body provided without `body_type`
/// - A path that is not absolute
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path does not start with `/`.
    #[error("Request path '{path}' must be absolute.")]
    RelativePath {
        /// The offending path.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// This enum provides a single error type for HTTP operations, making it
/// easier to handle errors at API boundaries.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the status classification for response errors.
    #[must_use]
    pub const fn kind(&self) -> Option<ResponseKind> {
        match self {
            Self::Response(e) => Some(e.kind()),
            _ => None,
        }
    }
}
