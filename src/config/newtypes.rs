//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated New Relic account API key.
///
/// The key is sent verbatim in the `x-api-key` header of every request.
/// Its value is masked in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use newrelic_api::ApiKey;
///
/// let key = ApiKey::new("8022da2f6d143de67e05").unwrap();
/// assert_eq!(key.as_ref(), "8022da2f6d143de67e05");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key.to_string()))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated API host name.
///
/// Hosts are bare names (`api.newrelic.com`, `localhost`); the scheme and
/// port are derived separately from the TLS flag and port setting.
///
/// # Example
///
/// ```rust
/// use newrelic_api::Host;
///
/// let host = Host::new("Integration.NewRelic.com").unwrap();
/// assert_eq!(host.as_ref(), "integration.newrelic.com");
///
/// assert!(Host::new("https://api.newrelic.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host(String);

impl Host {
    /// Creates a new validated host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty, contains a
    /// scheme, a path, a port, or whitespace.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let host = host.trim().to_lowercase();

        if !Self::is_valid_host_name(&host) {
            return Err(ConfigError::InvalidHost { host });
        }

        Ok(Self(host))
    }

    fn is_valid_host_name(host: &str) -> bool {
        if host.is_empty() || host.starts_with('.') || host.ends_with('.') {
            return false;
        }

        host.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated proxy URL.
///
/// This newtype validates that the URL has a scheme and a non-empty host.
///
/// # Example
///
/// ```rust
/// use newrelic_api::ProxyUrl;
///
/// let proxy = ProxyUrl::new("http://proxy.internal:3128").unwrap();
/// assert_eq!(proxy.scheme(), "http");
/// assert_eq!(proxy.host_name(), Some("proxy.internal"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ProxyUrl {
    /// Creates a new validated proxy URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxyUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidProxyUrl { url: url.clone() })?;

        if !Self::is_valid_scheme(&url[..scheme_end]) {
            return Err(ConfigError::InvalidProxyUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidProxyUrl { url: url.clone() });
        }

        // The authority ends at the first path, query or fragment delimiter
        let authority_end = url[host_start..]
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        // Credentials, if any, precede the host
        let authority_start = url[host_start..authority_end]
            .rfind('@')
            .map_or(host_start, |i| host_start + i + 1);
        let host_end = url[authority_start..authority_end]
            .find(':')
            .map_or(authority_end, |i| authority_start + i);

        if url[authority_start..host_end].is_empty() {
            return Err(ConfigError::InvalidProxyUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start: authority_start,
            host_end,
        })
    }

    // ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    fn is_valid_scheme(scheme: &str) -> bool {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    }

    /// Returns the URL scheme (e.g., "http").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for ProxyUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
