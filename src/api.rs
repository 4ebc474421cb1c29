//! The API handle.
//!
//! [`NewRelicApi`] owns everything requests read: the configuration, the
//! registry of defined types and the codec. Every operation borrows it, and
//! every mutation (`configure`, `define`, the resets) takes `&mut self`, so
//! configuration cannot change underneath a request borrowed from the same
//! handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use newrelic_api::{ApiConfig, ApiKey, NewRelicApi};
//! use newrelic_api::resources::ACCOUNT;
//! use newrelic_api::rest::FindOptions;
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .build()?;
//! let api = NewRelicApi::with_default_resources(config)?;
//!
//! let account = api.resource(ACCOUNT)?.first().await?;
//! let applications = account.resolve(&api, "applications", FindOptions::new()).await?;
//! for app in applications.resources() {
//!     let health = app.resolve(&api, "threshold_values", FindOptions::new()).await?;
//!     println!("{}: {} indicators", app.str_value("name").unwrap_or("?"), health.len());
//! }
//! ```

use crate::config::{ApiConfig, SiteUrl};
use crate::error::ConfigError;
use crate::resources;
use crate::rest::{
    Fields, Found, JsonCodec, Params, RegisteredType, Resource, ResourceClient, ResourceCodec,
    ResourceError, ResourceRegistry, ResourceType, Selector,
};

/// Configuration, type registry and codec for one API.
#[derive(Debug)]
pub struct NewRelicApi {
    config: ApiConfig,
    registry: ResourceRegistry,
    codec: Box<dyn ResourceCodec>,
}

// Verify NewRelicApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NewRelicApi>();
};

impl Default for NewRelicApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl NewRelicApi {
    /// Creates a handle with no types defined, using [`JsonCodec`].
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_codec(config, JsonCodec)
    }

    /// Creates a handle with no types defined, using `codec` for bodies.
    #[must_use]
    pub fn with_codec(config: ApiConfig, codec: impl ResourceCodec + 'static) -> Self {
        Self {
            config,
            registry: ResourceRegistry::new(),
            codec: Box::new(codec),
        }
    }

    /// Creates a handle with the whole New Relic catalogue defined.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a connection cannot be built.
    pub fn with_default_resources(config: ApiConfig) -> Result<Self, ConfigError> {
        let mut api = Self::new(config);
        resources::register_all(&mut api)?;
        Ok(api)
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    ///
    /// API key changes apply to the next request. Host, port, TLS and proxy
    /// changes apply after [`reset_all`](Self::reset_all).
    pub fn config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config
    }

    /// Replaces the configuration. Same propagation rules as
    /// [`config_mut`](Self::config_mut).
    pub fn configure(&mut self, config: ApiConfig) {
        self.config = config;
    }

    /// The registry of defined types.
    #[must_use]
    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// The codec bodies are read and written with.
    #[must_use]
    pub fn codec(&self) -> &dyn ResourceCodec {
        self.codec.as_ref()
    }

    /// Defines (registers) a type, connecting it to the current site.
    ///
    /// Defining a type whose qualified name is already registered replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the connection cannot be built.
    pub fn define(&mut self, resource_type: ResourceType) -> Result<(), ConfigError> {
        let client = ResourceClient::connect(&self.config)?;
        tracing::debug!(
            resource = resource_type.qualified_name(),
            site = %client.site(),
            "defined resource"
        );
        self.registry.register(resource_type, client);
        Ok(())
    }

    /// Returns the operations of a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnregisteredResource`] for an unknown name.
    pub fn resource(&self, qualified_name: &str) -> Result<ResourceHandle<'_>, ResourceError> {
        let entry = self
            .registry
            .get(qualified_name)
            .ok_or_else(|| ResourceError::UnregisteredResource {
                name: qualified_name.to_string(),
            })?;
        Ok(ResourceHandle { api: self, entry })
    }

    /// Reconnects one type to the site the current configuration names.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnregisteredResource`] for an unknown name, or
    /// [`ResourceError::Config`] if the connection cannot be built.
    pub fn reset_site(&mut self, qualified_name: &str) -> Result<(), ResourceError> {
        self.registry.reset(qualified_name, &self.config)
    }

    /// Reconnects every type to the site the current configuration names.
    ///
    /// Returns the new site. Requests already in flight keep their old
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a connection cannot be built.
    pub fn reset_all(&mut self) -> Result<SiteUrl, ConfigError> {
        self.registry.reset_all(&self.config)?;
        Ok(self.config.site_url())
    }
}

/// The find and create operations of one registered type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceHandle<'a> {
    api: &'a NewRelicApi,
    entry: &'a RegisteredType,
}

impl<'a> ResourceHandle<'a> {
    /// The type definition.
    #[must_use]
    pub const fn resource_type(&self) -> &'a ResourceType {
        self.entry.resource_type()
    }

    /// The site this type currently talks to.
    #[must_use]
    pub const fn site(&self) -> &'a SiteUrl {
        self.entry.client().site()
    }

    /// Finds records. See [`ResourceClient::find`].
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::find`].
    pub async fn find(&self, selector: Selector, params: Params) -> Result<Found, ResourceError> {
        self.entry
            .client()
            .find(self.api, self.entry.resource_type(), selector, params)
            .await
    }

    /// Finds every record.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::find`].
    pub async fn all(&self) -> Result<Vec<Resource>, ResourceError> {
        self.find(Selector::All, Params::new())
            .await
            .map(Found::into_vec)
    }

    /// Finds the first record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if there are no records, or see
    /// [`ResourceClient::find`].
    pub async fn first(&self) -> Result<Resource, ResourceError> {
        self.entry
            .client()
            .find_one(self.api, self.entry.resource_type(), Selector::First, Params::new())
            .await
    }

    /// Creates a record. See [`ResourceClient::create`].
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::create`].
    pub async fn create(&self, attributes: Fields) -> Result<Resource, ResourceError> {
        self.entry
            .client()
            .create(self.api, self.entry.resource_type(), attributes)
            .await
    }
}
