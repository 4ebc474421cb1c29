//! HTTP client for New Relic API communication.
//!
//! This module provides the [`HttpClient`] type, the transport every
//! resource request goes through.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ProxyUrl, SiteUrl};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one site URL.
///
/// The client handles:
/// - Absolute URL construction from the site URL and request path
/// - Default headers (User-Agent)
/// - Optional proxying and TLS
/// - Status policy: 2xx succeed, everything else becomes
///   [`HttpError::Response`], except 422 when the request opts in with
///   [`accept_unprocessable`](crate::clients::HttpRequestBuilder::accept_unprocessable)
///
/// Redirects are not followed; they surface as errors carrying the
/// `Location` header.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use newrelic_api::ApiConfig;
/// use newrelic_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = ApiConfig::default();
/// let client = HttpClient::new(&config.site_url(), None, None)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/v1/accounts/")
///     .header("x-api-key", "my-key")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://api.newrelic.com:443`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given site.
    ///
    /// # Arguments
    ///
    /// * `site` - The `scheme://host:port` every request targets
    /// * `proxy` - Optional proxy all requests are routed through
    /// * `user_agent_prefix` - Optional prefix for the User-Agent header
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] if reqwest rejects the proxy,
    /// or [`ConfigError::HttpClientBuild`] if the client cannot be built.
    pub fn new(
        site: &SiteUrl,
        proxy: Option<&ProxyUrl>,
        user_agent_prefix: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_uri = site.to_string();

        let user_agent_prefix =
            user_agent_prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}New Relic API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none());

        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy.as_ref()).map_err(|_| {
                ConfigError::InvalidProxyUrl {
                    url: proxy.as_ref().to_string(),
                }
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClientBuild {
            site: base_uri.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_uri,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        tracing::debug!(method = %request.http_method, %url, "dispatching request");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let reason = res.status().canonical_reason().unwrap_or_default();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() || (code == 422 && request.accept_unprocessable) {
            return Ok(response);
        }

        tracing::debug!(%url, code, "request failed");

        let message = if response.body.trim().is_empty() {
            reason.to_string()
        } else {
            response.body.clone()
        };

        Err(HttpError::Response(HttpResponseError {
            code,
            message,
            error_reference: response.request_id().map(String::from),
            location: response.header("location").map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, Host};

    fn default_site() -> SiteUrl {
        ApiConfig::default().site_url()
    }

    #[test]
    fn test_client_construction_with_default_site() {
        let client = HttpClient::new(&default_site(), None, None).unwrap();
        assert_eq!(client.base_uri(), "https://api.newrelic.com:443");
    }

    #[test]
    fn test_client_construction_with_custom_site() {
        let config = ApiConfig::builder()
            .host(Host::new("localhost").unwrap())
            .port(3000)
            .build()
            .unwrap();

        let client = HttpClient::new(&config.site_url(), None, None).unwrap();
        assert_eq!(client.base_uri(), "http://localhost:3000");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&default_site(), None, None).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("New Relic API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(&default_site(), None, Some("Deployer/2.1")).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Deployer/2.1 | "));
    }

    #[test]
    fn test_client_accepts_proxy() {
        let proxy = ProxyUrl::new("http://proxy.local:8080").unwrap();
        let client = HttpClient::new(&default_site(), Some(&proxy), None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
