//! Applications and their agents.

use serde_json::json;

use crate::resources::{ACCOUNT_APPLICATION_RESOURCE_PATH, ACCOUNT_RESOURCE_PATH, NAMESPACE};
use crate::rest::{params_from_json, Params, Resource, ResourceType};

const APPLICATION_NAMESPACE: &str = "NewRelicApi::Application";

fn application_scope(application: &Resource) -> Params {
    params_from_json(json!({
        "account_id": application.prefix_option("account_id"),
        "application_id": application.value("id"),
    }))
}

// Agents of a clustered application scope by the cluster's id.
fn agent_scope(agent: &Resource) -> Params {
    params_from_json(json!({
        "account_id": agent.prefix_option("account_id"),
        "application_id": agent.value("cluster_agent_id"),
    }))
}

/// `NewRelicApi::Application`: an application reporting to an account.
///
/// Declares `agents` (resolved to `NewRelicApi::Application::Agent`) and
/// `threshold_values` (the application's health indicators).
#[must_use]
pub fn application_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "Application")
        .prefix(ACCOUNT_RESOURCE_PATH)
        .has_many(&["agents", "threshold_values"])
        .scope(application_scope)
        .build()
}

/// `NewRelicApi::Application::Agent`: one agent instance of an application.
#[must_use]
pub fn agent_type() -> ResourceType {
    ResourceType::builder(APPLICATION_NAMESPACE, "Agent")
        .prefix(ACCOUNT_APPLICATION_RESOURCE_PATH)
        .scope(agent_scope)
        .build()
}
