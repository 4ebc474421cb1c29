//! Per-type connection and the find/create operations.
//!
//! A [`ResourceClient`] is the connection state one registered type uses:
//! the site URL and proxy it was built from and the [`HttpClient`] bound to
//! them. It is computed when the type is defined and again on reset, never
//! per request. The API key, by contrast, is read from the configuration
//! each time a request is built.

use serde_json::Value;

use crate::api::NewRelicApi;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::{ApiConfig, ProxyUrl, SiteUrl};
use crate::error::ConfigError;
use crate::rest::attributes::{Attribute, AttributeBag};
use crate::rest::codec::{unwrap_element, Fields, RootNames};
use crate::rest::errors::ResourceError;
use crate::rest::query::{to_query_pairs, Params};
use crate::rest::registry::ResourceRegistry;
use crate::rest::resource::{Found, Resource, ResourceType, Selector};

/// Header carrying the account API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Connection state of one registered type.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    site: SiteUrl,
    proxy: Option<ProxyUrl>,
    http: HttpClient,
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceClient>();
};

impl ResourceClient {
    /// Builds a connection from the current host, port, TLS flag and proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built.
    pub fn connect(config: &ApiConfig) -> Result<Self, ConfigError> {
        let site = config.site_url();
        let proxy = config.proxy().cloned();
        let http = HttpClient::new(&site, proxy.as_ref(), config.user_agent_prefix())?;
        Ok(Self { site, proxy, http })
    }

    /// The site requests are sent to.
    #[must_use]
    pub const fn site(&self) -> &SiteUrl {
        &self.site
    }

    /// The proxy requests are routed through, if any.
    #[must_use]
    pub const fn proxy(&self) -> Option<&ProxyUrl> {
        self.proxy.as_ref()
    }

    /// The underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Finds records of `resource_type`.
    ///
    /// Parameters naming a prefix placeholder fill the path; the rest
    /// become the query string. Each returned record carries the path
    /// parameters as its prefix options.
    ///
    /// - `All` returns every record, possibly none.
    /// - `First` and `One` return the first record of the collection.
    /// - `Id` fetches the element path and returns its record.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::MissingApiKey`] before any I/O if no key is configured
    /// - [`ResourceError::MissingPathParameter`] if a prefix placeholder has no value
    /// - [`ResourceError::NotFound`] if a single-record selector matched nothing
    /// - [`ResourceError::Http`] and [`ResourceError::Codec`] from the collaborators
    pub async fn find(
        &self,
        api: &NewRelicApi,
        resource_type: &ResourceType,
        selector: Selector,
        params: Params,
    ) -> Result<Found, ResourceError> {
        match selector {
            Selector::All => self
                .fetch(api, resource_type, &selector, params)
                .await
                .map(Found::Many),
            Selector::First | Selector::One | Selector::Id(_) => self
                .find_one(api, resource_type, selector, params)
                .await
                .map(Found::One),
        }
    }

    /// Finds a single record of `resource_type`: the first one decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if nothing was decoded, or see
    /// [`find`](Self::find).
    pub async fn find_one(
        &self,
        api: &NewRelicApi,
        resource_type: &ResourceType,
        selector: Selector,
        params: Params,
    ) -> Result<Resource, ResourceError> {
        self.fetch(api, resource_type, &selector, params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ResourceError::NotFound {
                resource: resource_type.qualified_name().to_string(),
                selector: selector.to_string(),
            })
    }

    async fn fetch(
        &self,
        api: &NewRelicApi,
        resource_type: &ResourceType,
        selector: &Selector,
        params: Params,
    ) -> Result<Vec<Resource>, ResourceError> {
        let api_key = api.config().api_key().ok_or(ResourceError::MissingApiKey)?;

        let (prefix_options, query) = resource_type.split_params(params);
        let path = match selector {
            Selector::Id(id) => resource_type.element_path(id, &prefix_options)?,
            Selector::All | Selector::First | Selector::One => {
                resource_type.collection_path(&prefix_options)?
            }
        };

        let codec = api.codec();
        let mut builder = HttpRequest::builder(HttpMethod::Get, path)
            .header(API_KEY_HEADER, api_key.as_ref())
            .header("Accept", codec.content_type());
        let pairs = to_query_pairs(&query);
        if !pairs.is_empty() {
            builder = builder.query(pairs);
        }
        let request = builder.build().map_err(HttpError::from)?;

        tracing::debug!(
            resource = resource_type.qualified_name(),
            %selector,
            "finding resources"
        );

        let response = self.http.request(request).await?;
        let records = codec
            .decode(&response.body, root_names(resource_type))?
            .into_records();

        Ok(records
            .into_iter()
            .map(|fields| {
                materialize(api.registry(), resource_type, fields, prefix_options.clone())
            })
            .collect())
    }

    /// Creates a record of `resource_type`.
    ///
    /// Attributes naming a prefix placeholder fill the path; the rest are
    /// encoded as the body, wrapped in the element name. No validation
    /// happens client-side: a 422 response yields a resource carrying the
    /// server's messages, whose [`Resource::valid`] is `false`.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::MissingApiKey`] before any I/O if no key is configured
    /// - [`ResourceError::MissingPathParameter`] if a prefix placeholder has no value
    /// - [`ResourceError::Http`] and [`ResourceError::Codec`] from the collaborators
    pub async fn create(
        &self,
        api: &NewRelicApi,
        resource_type: &ResourceType,
        attributes: Fields,
    ) -> Result<Resource, ResourceError> {
        let api_key = api.config().api_key().ok_or(ResourceError::MissingApiKey)?;

        let (prefix_options, fields): (Params, Fields) = {
            let mut prefix_options = Params::new();
            let mut fields = Fields::new();
            for (key, value) in attributes {
                if resource_type.prefix().has_placeholder(&key) {
                    prefix_options.insert(key, value);
                } else {
                    fields.insert(key, value);
                }
            }
            (prefix_options, fields)
        };
        let path = resource_type.collection_path(&prefix_options)?;

        let codec = api.codec();
        let body = codec.encode(resource_type.element_name(), &fields)?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .header(API_KEY_HEADER, api_key.as_ref())
            .header("Accept", codec.content_type())
            .body(body)
            .body_type(codec.data_type())
            .accept_unprocessable(true)
            .build()
            .map_err(HttpError::from)?;

        tracing::debug!(resource = resource_type.qualified_name(), "creating resource");

        let response = self.http.request(request).await?;

        if response.code == 422 {
            let mut errors = codec.decode_errors(&response.body);
            if errors.is_empty() {
                let body = response.body.trim();
                errors.push(if body.is_empty() {
                    "Unprocessable Entity".to_string()
                } else {
                    body.to_string()
                });
            }
            tracing::debug!(
                resource = resource_type.qualified_name(),
                errors = errors.len(),
                "create rejected"
            );
            return Ok(Resource::new(
                resource_type.qualified_name(),
                AttributeBag::from_fields(fields),
                prefix_options,
            )
            .with_errors(errors));
        }

        let mut merged = fields;
        if let Some(server_fields) = codec
            .decode(&response.body, root_names(resource_type))?
            .into_records()
            .into_iter()
            .next()
        {
            merged.extend(server_fields);
        }

        Ok(materialize(
            api.registry(),
            resource_type,
            merged,
            prefix_options,
        ))
    }
}

fn root_names(resource_type: &ResourceType) -> RootNames<'_> {
    RootNames {
        element: resource_type.element_name(),
        collection: resource_type.collection_name(),
    }
}

/// Wraps a decoded record as an instance of `resource_type`.
///
/// Declared relationship fields holding a list of records become embedded
/// collections of the target type, scoped by the new instance. A field whose
/// target type cannot be resolved keeps its raw value.
pub(crate) fn materialize(
    registry: &ResourceRegistry,
    resource_type: &ResourceType,
    fields: Fields,
    prefix_options: Params,
) -> Resource {
    let mut resource = Resource::new(
        resource_type.qualified_name(),
        AttributeBag::from_fields(fields),
        prefix_options,
    );
    let scope = resource_type.scope_params(&resource);

    for relationship in resource_type.relationships() {
        let items: Vec<Fields> = match resource.get(relationship) {
            Some(Attribute::Value(Value::Array(items))) if items.iter().all(Value::is_object) => {
                items.iter().filter_map(|item| item.as_object().cloned()).collect()
            }
            _ => continue,
        };

        match registry.resolve(relationship, resource_type) {
            Ok(target) => {
                let target_type = target.resource_type();
                let (child_prefix, _) = target_type.split_params(scope.clone());
                let children = items
                    .into_iter()
                    .map(|item| unwrap_element(item, target_type.element_name()))
                    .map(|item| materialize(registry, target_type, item, child_prefix.clone()))
                    .collect();
                resource
                    .attributes_mut()
                    .insert(relationship.clone(), Attribute::Collection(children));
            }
            Err(e) => {
                tracing::warn!(
                    resource = resource_type.qualified_name(),
                    relationship = relationship.as_str(),
                    error = %e,
                    "keeping embedded relationship as raw value"
                );
            }
        }
    }

    resource
}
