//! The New Relic v1 resource catalogue.
//!
//! Every type the v1 REST API serves, defined on top of the generic
//! [`rest`](crate::rest) engine:
//!
//! | Type                                 | Collection path                                    |
//! |--------------------------------------|----------------------------------------------------|
//! | `NewRelicApi::Account`               | `/api/v1/accounts/`                                |
//! | `NewRelicApi::Account::AccountView`  | `/api/v1/accounts/:account_id/account_views/`      |
//! | `NewRelicApi::Account::AccountUsage` | `/api/v1/account_usages/`                          |
//! | `NewRelicApi::Application`           | `/api/v1/accounts/:account_id/applications/`       |
//! | `NewRelicApi::Application::Agent`    | `.../applications/:application_id/agents/`         |
//! | `NewRelicApi::ThresholdValue`        | `.../applications/:application_id/threshold_values/` |
//! | `NewRelicApi::Deployment`            | `/api/v1/deployments/`                             |
//! | `NewRelicApi::Subscription`          | `/api/v1/subscriptions/`                           |
//! | `NewRelicApi::User`                  | `/api/v1/users/`                                   |
//!
//! Accounts declare `applications` and `account_views`; applications declare
//! `agents` and `threshold_values`.
//!
//! # Example
//!
//! ```rust,ignore
//! use newrelic_api::{ApiConfig, NewRelicApi};
//! use newrelic_api::resources::{self, ThresholdValue};
//! use newrelic_api::rest::{FindOptions, Selector};
//!
//! let api = NewRelicApi::with_default_resources(ApiConfig::from_env()?)?;
//!
//! let found = resources::application_health(&api, Selector::First).await?;
//! let Some(account) = found.into_one() else {
//!     return Ok(());
//! };
//! let apps = account.resolve(&api, "applications", FindOptions::new()).await?;
//! for app in apps.resources() {
//!     let values = app.resolve(&api, "threshold_values", FindOptions::new()).await?;
//!     for value in values.resources() {
//!         println!("{}", ThresholdValue::new(value));
//!     }
//! }
//! ```

mod account;
mod application;
mod deployment;
mod subscription;
mod threshold_value;
mod user;

pub use account::{
    account_type, account_usage_type, account_view_type, application_health, AccountView,
};
pub use application::{agent_type, application_type};
pub use deployment::{create_deployment, deployment_type};
pub use subscription::subscription_type;
pub use threshold_value::{threshold_value_type, Color, ThresholdValue};
pub use user::user_type;

use crate::api::NewRelicApi;
use crate::error::ConfigError;
use crate::rest::ResourceType;

/// Namespace every catalogue type lives in.
pub const NAMESPACE: &str = "NewRelicApi";

/// Versioned root every catalogue path starts with.
pub const ROOT_PATH: &str = "/api/v1/";
/// Prefix of types scoped by an account.
pub const ACCOUNT_RESOURCE_PATH: &str = "/api/v1/accounts/:account_id/";
/// Prefix of types scoped by an account's agent.
pub const ACCOUNT_AGENT_RESOURCE_PATH: &str = "/api/v1/accounts/:account_id/agents/:agent_id/";
/// Prefix of types scoped by an account's application.
pub const ACCOUNT_APPLICATION_RESOURCE_PATH: &str =
    "/api/v1/accounts/:account_id/applications/:application_id/";

/// Qualified name of the account type.
pub const ACCOUNT: &str = "NewRelicApi::Account";
/// Qualified name of the account view type.
pub const ACCOUNT_VIEW: &str = "NewRelicApi::Account::AccountView";
/// Qualified name of the account usage type.
pub const ACCOUNT_USAGE: &str = "NewRelicApi::Account::AccountUsage";
/// Qualified name of the application type.
pub const APPLICATION: &str = "NewRelicApi::Application";
/// Qualified name of the application agent type.
pub const AGENT: &str = "NewRelicApi::Application::Agent";
/// Qualified name of the threshold value type.
pub const THRESHOLD_VALUE: &str = "NewRelicApi::ThresholdValue";
/// Qualified name of the deployment type.
pub const DEPLOYMENT: &str = "NewRelicApi::Deployment";
/// Qualified name of the subscription type.
pub const SUBSCRIPTION: &str = "NewRelicApi::Subscription";
/// Qualified name of the user type.
pub const USER: &str = "NewRelicApi::User";

/// Returns every catalogue type definition.
#[must_use]
pub fn definitions() -> Vec<ResourceType> {
    vec![
        account_type(),
        account_view_type(),
        account_usage_type(),
        application_type(),
        agent_type(),
        threshold_value_type(),
        deployment_type(),
        subscription_type(),
        user_type(),
    ]
}

/// Defines every catalogue type on `api`.
///
/// # Errors
///
/// Returns [`ConfigError`] if a connection cannot be built.
pub fn register_all(api: &mut NewRelicApi) -> Result<(), ConfigError> {
    for resource_type in definitions() {
        api.define(resource_type)?;
    }
    Ok(())
}
