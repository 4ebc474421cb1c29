//! Subscriptions.

use serde_json::json;

use crate::resources::{NAMESPACE, ROOT_PATH};
use crate::rest::{params_from_json, Params, Resource, ResourceType};

// Scoped by the subscription's own account_id field, not a prefix option.
fn subscription_scope(subscription: &Resource) -> Params {
    params_from_json(json!({ "account_id": subscription.value("account_id") }))
}

/// `NewRelicApi::Subscription`: an account's subscription level.
#[must_use]
pub fn subscription_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "Subscription")
        .prefix(ROOT_PATH)
        .scope(subscription_scope)
        .build()
}
