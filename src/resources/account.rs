//! Accounts and their views and usages.

use serde_json::{json, Value};

use crate::api::NewRelicApi;
use crate::resources::{ACCOUNT, ACCOUNT_RESOURCE_PATH, NAMESPACE, ROOT_PATH};
use crate::rest::{params_from_json, Found, Params, Resource, ResourceError, ResourceType, Selector};

const ACCOUNT_NAMESPACE: &str = "NewRelicApi::Account";

fn account_scope(account: &Resource) -> Params {
    params_from_json(json!({ "account_id": account.value("id") }))
}

fn account_view_scope(view: &Resource) -> Params {
    params_from_json(json!({ "account_id": view.prefix_option("account_id") }))
}

/// `NewRelicApi::Account`: the account the API key belongs to.
///
/// Nested requests are scoped by `account_id` = the account's id.
#[must_use]
pub fn account_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "Account")
        .prefix(ROOT_PATH)
        .has_many(&["applications", "account_views"])
        .scope(account_scope)
        .build()
}

/// `NewRelicApi::Account::AccountView`: a user's view of an account.
#[must_use]
pub fn account_view_type() -> ResourceType {
    ResourceType::builder(ACCOUNT_NAMESPACE, "AccountView")
        .prefix(ACCOUNT_RESOURCE_PATH)
        .scope(account_view_scope)
        .build()
}

/// `NewRelicApi::Account::AccountUsage`.
#[must_use]
pub fn account_usage_type() -> ResourceType {
    ResourceType::builder(ACCOUNT_NAMESPACE, "AccountUsage")
        .prefix(ROOT_PATH)
        .build()
}

/// Finds accounts with every application and its threshold values inline.
///
/// Issues one request with `include=application_health`; resolving
/// `applications` and then `threshold_values` on the result makes no
/// further requests when the server embedded them.
///
/// # Errors
///
/// Returns [`ResourceError::UnregisteredResource`] if the catalogue is not
/// registered, or whatever the find fails with.
pub async fn application_health(
    api: &NewRelicApi,
    selector: Selector,
) -> Result<Found, ResourceError> {
    let params = params_from_json(json!({ "include": "application_health" }));
    api.resource(ACCOUNT)?.find(selector, params).await
}

/// Read access to the fields of an account view.
#[derive(Debug, Clone, Copy)]
pub struct AccountView<'a> {
    resource: &'a Resource,
}

impl<'a> AccountView<'a> {
    /// Wraps a resource of type `NewRelicApi::Account::AccountView`.
    #[must_use]
    pub const fn new(resource: &'a Resource) -> Self {
        Self { resource }
    }

    /// The raw `user` field.
    #[must_use]
    pub fn user(&self) -> Option<&'a Value> {
        self.resource.value("user")
    }

    /// The account this view was fetched under.
    #[must_use]
    pub fn account_id(&self) -> Option<&'a Value> {
        self.resource.prefix_option("account_id")
    }
}
