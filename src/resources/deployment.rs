//! Deployment markers.
//!
//! Deployments only support create. The server looks the application up
//! by `app_name` or by `application_id`.

use crate::api::NewRelicApi;
use crate::resources::{DEPLOYMENT, NAMESPACE, ROOT_PATH};
use crate::rest::{Fields, Resource, ResourceError, ResourceType};

/// `NewRelicApi::Deployment`.
#[must_use]
pub fn deployment_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "Deployment")
        .prefix(ROOT_PATH)
        .build()
}

/// Records a production deployment.
///
/// A rejected deployment (for example an unknown application) is returned
/// with its errors rather than as an `Err`; check [`Resource::valid`].
///
/// # Errors
///
/// Returns [`ResourceError::UnregisteredResource`] if the catalogue is not
/// registered, or whatever the create fails with.
///
/// # Example
///
/// ```rust,ignore
/// use newrelic_api::resources::create_deployment;
/// use serde_json::json;
///
/// let fields = json!({"app_name": "gold app", "revision": "1.2.3"});
/// let deployment = create_deployment(&api, fields.as_object().unwrap().clone()).await?;
/// assert!(deployment.valid(), "{:?}", deployment.errors());
/// ```
pub async fn create_deployment(
    api: &NewRelicApi,
    attributes: Fields,
) -> Result<Resource, ResourceError> {
    api.resource(DEPLOYMENT)?.create(attributes).await
}
