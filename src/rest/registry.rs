//! Registry of resource types.
//!
//! Every type defined on a [`NewRelicApi`](crate::NewRelicApi) lands here
//! together with its [`ResourceClient`]. Relationship targets are looked up
//! by name at resolution time, never at definition time, so types may be
//! defined in any order and may refer to one another.

use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::rest::client::ResourceClient;
use crate::rest::errors::ResourceError;
use crate::rest::inflect;
use crate::rest::resource::ResourceType;

/// A registered type and its connection.
#[derive(Debug, Clone)]
pub struct RegisteredType {
    resource_type: ResourceType,
    client: ResourceClient,
}

impl RegisteredType {
    /// The type definition.
    #[must_use]
    pub const fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// The connection requests for this type go through.
    #[must_use]
    pub const fn client(&self) -> &ResourceClient {
        &self.client
    }
}

/// Ordered set of registered types, keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: Vec<RegisteredType>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type. A type with the same qualified name is replaced in place.
    pub fn register(&mut self, resource_type: ResourceType, client: ResourceClient) {
        let entry = RegisteredType {
            resource_type,
            client,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.resource_type.qualified_name() == entry.resource_type.qualified_name())
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Looks up a type by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&RegisteredType> {
        self.entries
            .iter()
            .find(|e| e.resource_type.qualified_name() == qualified_name)
    }

    /// Resolves the target type of a relationship declared on `declaring`.
    ///
    /// The relationship name is camelized and singularized
    /// (`threshold_values` → `ThresholdValue`), then looked up first inside
    /// the declaring type (`NewRelicApi::Application::ThresholdValue`) and
    /// then beside it (`NewRelicApi::ThresholdValue`). A nested type always
    /// wins over a sibling with the same name.
    ///
    /// Plurals with more than one plausible singular (`caches` may be
    /// `Cache` or `Cach`) try every candidate, nested ones first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownResourceType`] if neither lookup matches.
    pub fn resolve(
        &self,
        relationship: &str,
        declaring: &ResourceType,
    ) -> Result<&RegisteredType, ResourceError> {
        let candidates = inflect::singular_candidates(&inflect::camelize(relationship));
        let qualify = |namespace: &str, name: &str| {
            if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{namespace}::{name}")
            }
        };

        let nested = candidates
            .iter()
            .find_map(|name| self.get(&qualify(declaring.qualified_name(), name)));
        let found = nested.or_else(|| {
            candidates
                .iter()
                .find_map(|name| self.get(&qualify(declaring.namespace(), name)))
        });

        found.ok_or_else(|| ResourceError::UnknownResourceType {
            name: candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| relationship.to_string()),
            namespace: format!("{}, {}", declaring.qualified_name(), declaring.namespace()),
        })
    }

    /// Rebuilds one type's connection from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnregisteredResource`] for an unknown name, or
    /// [`ResourceError::Config`] if the connection cannot be built.
    pub fn reset(&mut self, qualified_name: &str, config: &ApiConfig) -> Result<(), ResourceError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.resource_type.qualified_name() == qualified_name)
            .ok_or_else(|| ResourceError::UnregisteredResource {
                name: qualified_name.to_string(),
            })?;
        entry.client = ResourceClient::connect(config)?;
        tracing::debug!(
            resource = qualified_name,
            site = %entry.client.site(),
            "reset resource site"
        );
        Ok(())
    }

    /// Rebuilds every type's connection from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a connection cannot be built. Types reset
    /// before the failure keep their new connection.
    pub fn reset_all(&mut self, config: &ApiConfig) -> Result<(), ConfigError> {
        for entry in &mut self.entries {
            entry.client = ResourceClient::connect(config)?;
        }
        tracing::debug!(
            count = self.entries.len(),
            site = %config.site_url(),
            "reset all resource sites"
        );
        Ok(())
    }

    /// Iterates over registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.entries.iter()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
