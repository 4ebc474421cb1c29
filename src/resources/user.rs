//! Users.

use crate::resources::{NAMESPACE, ROOT_PATH};
use crate::rest::ResourceType;

/// `NewRelicApi::User`.
#[must_use]
pub fn user_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "User")
        .prefix(ROOT_PATH)
        .build()
}
