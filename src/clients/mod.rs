//! HTTP transport for New Relic API communication.
//!
//! This module provides the HTTP layer the resource engine delegates every
//! request to. It knows nothing about resources: it sends a request to a
//! site, applies the status policy and hands back the raw body.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client bound to one site URL
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`DataType`]: Content types for request bodies
//! - [`HttpError`] and [`ResponseKind`]: Transport errors and status classification
//!
//! # Retry Behavior
//!
//! There is none. A failed request fails the calling operation immediately;
//! timeouts and retries are left to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, ResponseKind};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
