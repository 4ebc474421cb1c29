//! Configuration types for the New Relic API client.
//!
//! This module provides the process-level settings every resource request
//! reads from: the API key, the API host, port, TLS flag and proxy.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The configuration struct holding all client settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`SiteUrl`]: The `scheme://host:port` site derived from a configuration
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`Host`]: A validated bare host name
//! - [`ProxyUrl`]: A validated proxy URL
//!
//! # Propagation
//!
//! Every registered resource type snapshots the site URL and proxy when it is
//! defined. Changing the host, port, TLS flag or proxy afterwards has no
//! effect until [`NewRelicApi::reset_all`](crate::NewRelicApi::reset_all) is
//! called. The API key is the exception: it is read when each request is
//! built.
//!
//! # Example
//!
//! ```rust
//! use newrelic_api::{ApiConfig, ApiKey, Host};
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .host(Host::new("integration.newrelic.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.site_url().to_string(), "https://integration.newrelic.com:443");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, Host, ProxyUrl};

use std::fmt;

use crate::error::ConfigError;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "api.newrelic.com";

/// Port used for TLS connections when none is configured.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Port used for plain HTTP connections when none is configured.
pub const DEFAULT_PLAIN_PORT: u16 = 80;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "NEWRELIC_API_KEY";
/// Environment variable holding the API host.
pub const ENV_HOST: &str = "NEWRELIC_HOST";
/// Environment variable holding the API port.
pub const ENV_PORT: &str = "NEWRELIC_PORT";
/// Environment variable holding the TLS flag (`true`/`false`/`1`/`0`).
pub const ENV_SSL: &str = "NEWRELIC_SSL";
/// Environment variable holding the proxy URL.
pub const ENV_PROXY: &str = "NEWRELIC_PROXY";

/// Configuration for the New Relic API client.
///
/// All fields are optional. A missing API key is only reported when a
/// request is attempted, as
/// [`ResourceError::MissingApiKey`](crate::rest::ResourceError::MissingApiKey).
///
/// # Example
///
/// ```rust
/// use newrelic_api::{ApiConfig, Host};
///
/// let mut config = ApiConfig::default();
/// assert_eq!(config.site_url().to_string(), "https://api.newrelic.com:443");
///
/// config.set_host(Some(Host::new("localhost").unwrap()));
/// config.set_port(Some(3000));
/// assert_eq!(config.site_url().to_string(), "http://localhost:3000");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    api_key: Option<ApiKey>,
    host: Option<Host>,
    port: Option<u16>,
    ssl: Option<bool>,
    proxy: Option<ProxyUrl>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Reads the configuration from `NEWRELIC_*` environment variables.
    ///
    /// Unset variables leave the corresponding setting at its default.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(key) = lookup(ENV_API_KEY) {
            builder = builder.api_key(ApiKey::new(key)?);
        }
        if let Some(host) = lookup(ENV_HOST) {
            builder = builder.host(Host::new(host)?);
        }
        if let Some(port) = lookup(ENV_PORT) {
            let parsed = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { port: port.clone() })?;
            builder = builder.port(parsed);
        }
        if let Some(ssl) = lookup(ENV_SSL) {
            builder = builder.ssl(matches!(
                ssl.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }
        if let Some(proxy) = lookup(ENV_PROXY) {
            builder = builder.proxy(ProxyUrl::new(proxy)?);
        }

        builder.build()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the configured host, if any.
    #[must_use]
    pub const fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the configured port, if any.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the configured TLS flag, if any.
    #[must_use]
    pub const fn ssl(&self) -> Option<bool> {
        self.ssl
    }

    /// Returns the proxy URL, if configured.
    #[must_use]
    pub const fn proxy(&self) -> Option<&ProxyUrl> {
        self.proxy.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Sets or clears the API key. Takes effect on the next request.
    pub fn set_api_key(&mut self, key: Option<ApiKey>) {
        self.api_key = key;
    }

    /// Sets or clears the host. Takes effect after a reset.
    pub fn set_host(&mut self, host: Option<Host>) {
        self.host = host;
    }

    /// Sets or clears the port. Takes effect after a reset.
    pub fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    /// Sets or clears the TLS flag. Takes effect after a reset.
    pub fn set_ssl(&mut self, ssl: Option<bool>) {
        self.ssl = ssl;
    }

    /// Sets or clears the proxy. Takes effect after a reset.
    pub fn set_proxy(&mut self, proxy: Option<ProxyUrl>) {
        self.proxy = proxy;
    }

    /// Derives the site URL from host, port and TLS flag.
    ///
    /// - The host defaults to [`DEFAULT_HOST`].
    /// - The port defaults to 443, or 80 when TLS is explicitly disabled.
    /// - The scheme is `https` when TLS is enabled, or when it is unset and
    ///   the port is 443.
    #[must_use]
    pub fn site_url(&self) -> SiteUrl {
        let host = self
            .host
            .as_ref()
            .map_or_else(|| DEFAULT_HOST.to_string(), |h| h.as_ref().to_string());

        let port = self.port.unwrap_or(match self.ssl {
            Some(false) => DEFAULT_PLAIN_PORT,
            _ => DEFAULT_TLS_PORT,
        });

        let tls = self.ssl.unwrap_or(port == DEFAULT_TLS_PORT);

        SiteUrl { tls, host, port }
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
    assert_send_sync::<SiteUrl>();
};

/// The `scheme://host:port` root every request URL starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    tls: bool,
    host: String,
    port: u16,
}

impl SiteUrl {
    /// Returns `"https"` or `"http"`.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` if requests use TLS.
    #[must_use]
    pub const fn is_tls(&self) -> bool {
        self.tls
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme(), self.host, self.port)
    }
}

/// Builder for constructing [`ApiConfig`] instances.
///
/// # Defaults
///
/// - `api_key`: `None` (requests fail with `MissingApiKey`)
/// - `host`: `api.newrelic.com`
/// - `port`: 443 (80 when `ssl(false)`)
/// - `ssl`: inferred from the port
/// - `proxy`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    api_key: Option<ApiKey>,
    host: Option<Host>,
    port: Option<u16>,
    ssl: Option<bool>,
    proxy: Option<ProxyUrl>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets whether requests use TLS.
    #[must_use]
    pub const fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    /// Sets the proxy URL.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyUrl) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if the port is 0.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        if self.port == Some(0) {
            return Err(ConfigError::InvalidPort {
                port: "0".to_string(),
            });
        }

        Ok(ApiConfig {
            api_key: self.api_key,
            host: self.host,
            port: self.port,
            ssl: self.ssl,
            proxy: self.proxy,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
