//! Relationship resolution.
//!
//! Resolving `applications` on an account goes through four steps:
//!
//! 1. If the account arrived with an `applications` field, return it.
//! 2. Otherwise resolve the target type (`Application`) in the registry.
//! 3. Merge the caller's parameters with the account's scope
//!    (`account_id`). On a key conflict the scope value is kept.
//! 4. Issue one find on the target type and return its result.
//!
//! Nothing fetched here is stored on the instance.

use crate::api::NewRelicApi;
use crate::rest::attributes::Related;
use crate::rest::errors::ResourceError;
use crate::rest::resource::{FindOptions, Resource};

/// Resolves declared relationships on instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipResolver;

impl RelationshipResolver {
    /// Resolves `relationship` on `instance`.
    ///
    /// The selector defaults to `All`. Errors from the registry, the
    /// transport and the codec are returned untouched.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnregisteredResource`] if the instance's type is not registered
    /// - [`ResourceError::UndeclaredRelationship`] if the type does not declare `relationship`
    /// - [`ResourceError::UnknownResourceType`] if the target type cannot be found
    /// - anything the nested find fails with
    pub async fn resolve<'r>(
        api: &NewRelicApi,
        instance: &'r Resource,
        relationship: &str,
        options: FindOptions,
    ) -> Result<Related<'r>, ResourceError> {
        let registry = api.registry();
        let declaring = registry
            .get(instance.type_name())
            .ok_or_else(|| ResourceError::UnregisteredResource {
                name: instance.type_name().to_string(),
            })?
            .resource_type();

        if !declaring.declares(relationship) {
            return Err(ResourceError::UndeclaredRelationship {
                resource: declaring.qualified_name().to_string(),
                relationship: relationship.to_string(),
            });
        }

        instance
            .attributes()
            .resolve_relationship(relationship, move || async move {
                let target = registry.resolve(relationship, declaring)?;
                let (selector, mut params) = options.into_parts();

                // Scope entries overwrite caller entries with the same key.
                params.extend(declaring.scope_params(instance));

                tracing::debug!(
                    resource = declaring.qualified_name(),
                    relationship,
                    target = target.resource_type().qualified_name(),
                    %selector,
                    "resolving relationship"
                );

                target
                    .client()
                    .find(api, target.resource_type(), selector, params)
                    .await
            })
            .await
    }
}
