//! Integration tests for relationship resolution.
//!
//! These tests walk account → applications → threshold values against a
//! mock server and verify scoping, embedded data, fetch-per-call behavior
//! and nested-versus-sibling target resolution.

use newrelic_api::resources::{self, Color, ThresholdValue, ACCOUNT, AGENT, APPLICATION};
use newrelic_api::rest::{
    params_from_json, AttributeBag, FindOptions, Params, Resource, ResourceType,
};
use newrelic_api::{ApiConfig, ApiKey, Host, NewRelicApi, ResourceError, Selector};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

/// Creates a configuration pointed at the mock server.
fn config_for(server: &MockServer) -> ApiConfig {
    let address = server.address();
    ApiConfig::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .host(Host::new(address.ip().to_string()).unwrap())
        .port(address.port())
        .ssl(false)
        .build()
        .unwrap()
}

fn api_for(server: &MockServer) -> NewRelicApi {
    NewRelicApi::with_default_resources(config_for(server)).unwrap()
}

async fn mount_get(server: &MockServer, url_path: &str, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

fn threshold_values() -> serde_json::Value {
    json!([
        {
            "name": "Apdex",
            "threshold_value": 1,
            "metric_value": 0.98,
            "formatted_metric_value": "0.98 [0.5]"
        },
        {
            "name": "CPU",
            "threshold_value": 3,
            "metric_value": 92.1,
            "formatted_metric_value": "92.1%"
        },
        {
            "name": "Memory",
            "threshold_value": 2,
            "metric_value": 512,
            "formatted_metric_value": "512 MB"
        }
    ])
}

// ============================================================================
// Fetched Relationships
// ============================================================================

#[tokio::test]
async fn test_account_applications_threshold_values_walk() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1, "name": "Gold"}]), 1).await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/",
        json!([{"id": 5, "name": "gold app"}]),
        1,
    )
    .await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/5/threshold_values/",
        threshold_values(),
        1,
    )
    .await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    let apps = account
        .resolve(&api, "applications", FindOptions::new())
        .await
        .unwrap();
    assert!(!apps.is_embedded());
    assert_eq!(apps.len(), 1);

    let app = &apps.resources()[0];
    assert_eq!(app.type_name(), APPLICATION);
    assert_eq!(app.prefix_option("account_id"), Some(&json!(1)));

    let values = app
        .resolve(&api, "threshold_values", FindOptions::new())
        .await
        .unwrap();
    let colors: Vec<Color> = values
        .resources()
        .iter()
        .map(|v| ThresholdValue::new(v).color_value())
        .collect();
    assert_eq!(colors, vec![Color::Green, Color::Red, Color::Yellow]);
    assert_eq!(
        ThresholdValue::new(&values.resources()[1]).to_string(),
        "CPU: Red (92.1%)"
    );
}

fn plain_account_scope(account: &Resource) -> Params {
    params_from_json(json!({ "account_id": account.value("id") }))
}

fn plain_application_scope(application: &Resource) -> Params {
    params_from_json(json!({
        "account_id": application.prefix_option("account_id"),
        "application_id": application.value("id"),
    }))
}

#[tokio::test]
async fn test_find_by_id_then_first_application_then_threshold_values() {
    let server = MockServer::start().await;

    mount_get(&server, "/accounts/1/", json!({"account": {"id": 1}}), 1).await;
    mount_get(&server, "/accounts/1/applications/", json!([{"id": 5}, {"id": 6}]), 1).await;
    mount_get(
        &server,
        "/accounts/1/applications/5/threshold_values/",
        threshold_values(),
        1,
    )
    .await;

    let mut api = NewRelicApi::new(config_for(&server));
    api.define(
        ResourceType::builder("Monitor", "Account")
            .has_many(&["applications", "account_views"])
            .scope(plain_account_scope)
            .build(),
    )
    .unwrap();
    api.define(
        ResourceType::builder("Monitor", "Application")
            .prefix("/accounts/:account_id/")
            .has_many(&["agents", "threshold_values"])
            .scope(plain_application_scope)
            .build(),
    )
    .unwrap();
    api.define(
        ResourceType::builder("Monitor", "ThresholdValue")
            .prefix("/accounts/:account_id/applications/:application_id/")
            .build(),
    )
    .unwrap();

    let account = api
        .resource("Monitor::Account")
        .unwrap()
        .find(Selector::id(1), Params::new())
        .await
        .unwrap()
        .into_one()
        .unwrap();
    let apps = account
        .resolve(&api, "applications", FindOptions::new().selector(Selector::First))
        .await
        .unwrap();
    let values = apps.resources()[0]
        .resolve(
            &api,
            "threshold_values",
            FindOptions::new().param("application_id", 999),
        )
        .await
        .unwrap();
    assert_eq!(values.len(), 3);

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/accounts/1/",
            "/accounts/1/applications/",
            "/accounts/1/applications/5/threshold_values/",
        ]
    );
}

#[tokio::test]
async fn test_each_resolve_fetches_again() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1}]), 1).await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/",
        json!([{"id": 5}]),
        2,
    )
    .await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    for _ in 0..2 {
        let apps = account
            .resolve(&api, "applications", FindOptions::new())
            .await
            .unwrap();
        assert_eq!(apps.len(), 1);
    }

    // Fetched results are never stored on the parent
    assert!(account.get("applications").is_none());
}

#[tokio::test]
async fn test_scope_wins_over_caller_params() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1}]), 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/applications/"))
        .and(query_param("conditions[name]", "My App"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 5, "name": "My App"}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/999/applications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    let options = FindOptions::new()
        .selector(Selector::First)
        .param("account_id", 999)
        .param("conditions", json!({"name": "My App"}));
    let found = account.resolve(&api, "applications", options).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found.resources()[0].str_value("name"), Some("My App"));
}

#[tokio::test]
async fn test_relationship_by_id() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1}]), 1).await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/5/",
        json!({"application": {"id": 5, "name": "gold app"}}),
        1,
    )
    .await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    let options = FindOptions::new().selector(Selector::id(5));
    let found = account.resolve(&api, "applications", options).await.unwrap();
    assert_eq!(found.resources()[0].str_value("name"), Some("gold app"));
}

#[tokio::test]
async fn test_relationship_by_unknown_id_passes_not_found_through() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1}]), 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/1/applications/9999/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    let options = FindOptions::new().selector(Selector::id(9999));
    let error = account
        .resolve(&api, "applications", options)
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_agents_scope_by_cluster() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/api/v1/accounts/1/applications/",
        json!([{"id": 5, "name": "gold app"}]),
        1,
    )
    .await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/5/agents/",
        json!([{"id": 77, "cluster_agent_id": 5}]),
        1,
    )
    .await;

    let api = api_for(&server);
    let apps = api
        .resource(APPLICATION)
        .unwrap()
        .find(Selector::All, params_from_json(json!({"account_id": 1})))
        .await
        .unwrap();

    let agents = apps.as_slice()[0]
        .resolve(&api, "agents", FindOptions::new())
        .await
        .unwrap();

    let agent = &agents.resources()[0];
    assert_eq!(agent.type_name(), AGENT);
    assert_eq!(agent.prefix_option("application_id"), Some(&json!(5)));
}

// ============================================================================
// Embedded Relationships
// ============================================================================

#[tokio::test]
async fn test_application_health_embeds_everything() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/"))
        .and(query_param("include", "application_health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Gold",
            "applications": [
                {"id": 5, "name": "gold app", "threshold_values": threshold_values()},
                {"id": 6, "name": "silver app", "threshold_values": []}
            ]
        }])))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/api/v1/accounts/1/applications/", json!([]), 0).await;
    mount_get(
        &server,
        "/api/v1/accounts/1/applications/5/threshold_values/",
        json!([]),
        0,
    )
    .await;

    let api = api_for(&server);
    let found = resources::application_health(&api, Selector::First)
        .await
        .unwrap();
    let account = found.first().unwrap();

    let apps = account
        .resolve(&api, "applications", FindOptions::new())
        .await
        .unwrap();
    assert!(apps.is_embedded());
    assert_eq!(apps.len(), 2);

    let gold = &apps.resources()[0];
    assert_eq!(gold.prefix_option("account_id"), Some(&json!(1)));

    let values = gold
        .resolve(&api, "threshold_values", FindOptions::new())
        .await
        .unwrap();
    assert!(values.is_embedded());
    assert_eq!(values.len(), 3);
    assert_eq!(
        values.resources()[0].prefix_options(),
        &params_from_json(json!({"account_id": 1, "application_id": 5}))
    );

    let silver = &apps.resources()[1];
    let empty = silver
        .resolve(&api, "threshold_values", FindOptions::new())
        .await
        .unwrap();
    assert!(empty.is_embedded());
    assert!(empty.is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_undeclared_relationship_makes_no_request() {
    let server = MockServer::start().await;

    mount_get(&server, "/api/v1/accounts/", json!([{"id": 1}]), 1).await;
    mount_get(&server, "/api/v1/accounts/1/users/", json!([]), 0).await;

    let api = api_for(&server);
    let account = api.resource(ACCOUNT).unwrap().first().await.unwrap();

    let error = account
        .resolve(&api, "users", FindOptions::new())
        .await
        .unwrap_err();
    match error {
        ResourceError::UndeclaredRelationship {
            resource,
            relationship,
        } => {
            assert_eq!(resource, ACCOUNT);
            assert_eq!(relationship, "users");
        }
        other => panic!("expected an undeclared relationship, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_target_type() {
    let server = MockServer::start().await;

    let mut api = NewRelicApi::new(config_for(&server));
    api.define(
        ResourceType::builder("Test", "Team")
            .has_many(&["robots"])
            .build(),
    )
    .unwrap();

    let team = Resource::new("Test::Team", AttributeBag::new(), Params::new());
    let error = team
        .resolve(&api, "robots", FindOptions::new())
        .await
        .unwrap_err();

    match error {
        ResourceError::UnknownResourceType { name, .. } => assert_eq!(name, "Robot"),
        other => panic!("expected an unknown resource type, got {other:?}"),
    }
}

// ============================================================================
// Target Resolution
// ============================================================================

fn team_scope(team: &Resource) -> Params {
    params_from_json(json!({ "team_id": team.value("id") }))
}

fn team(id: u64) -> Resource {
    let fields = json!({ "id": id }).as_object().cloned().unwrap();
    Resource::new("Test::Team", AttributeBag::from_fields(fields), Params::new())
}

#[tokio::test]
async fn test_nested_type_beats_sibling() {
    let server = MockServer::start().await;

    mount_get(&server, "/teams/3/members/", json!([{"id": 1}]), 1).await;
    mount_get(&server, "/members/", json!([]), 0).await;

    let mut api = NewRelicApi::new(config_for(&server));
    api.define(
        ResourceType::builder("Test", "Team")
            .has_many(&["members"])
            .scope(team_scope)
            .build(),
    )
    .unwrap();
    api.define(ResourceType::builder("Test", "Member").build())
        .unwrap();
    api.define(
        ResourceType::builder("Test::Team", "Member")
            .prefix("/teams/:team_id/")
            .build(),
    )
    .unwrap();

    let instance = team(3);

    let members = instance
        .resolve(&api, "members", FindOptions::new())
        .await
        .unwrap();
    assert_eq!(members.resources()[0].type_name(), "Test::Team::Member");
}

#[tokio::test]
async fn test_sibling_type_is_used_without_nested() {
    let server = MockServer::start().await;

    mount_get(&server, "/members/", json!([{"id": 1}]), 1).await;

    let mut api = NewRelicApi::new(config_for(&server));
    api.define(
        ResourceType::builder("Test", "Team")
            .has_many(&["members"])
            .scope(team_scope)
            .build(),
    )
    .unwrap();
    api.define(ResourceType::builder("Test", "Member").build())
        .unwrap();

    let instance = team(3);

    // team_id is not a placeholder of the sibling, so it goes to the query
    let members = instance
        .resolve(&api, "members", FindOptions::new())
        .await
        .unwrap();
    assert_eq!(members.resources()[0].type_name(), "Test::Member");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("team_id=3"));
}

#[tokio::test]
async fn test_relationship_with_ambiguous_plural_resolves() {
    let server = MockServer::start().await;

    mount_get(&server, "/caches/", json!([{"id": 1, "size": 64}]), 1).await;

    let mut api = NewRelicApi::new(config_for(&server));
    api.define(
        ResourceType::builder("Test", "Server")
            .has_many(&["caches"])
            .build(),
    )
    .unwrap();
    api.define(ResourceType::builder("Test", "Cache").build())
        .unwrap();
    assert_eq!(
        api.resource("Test::Cache")
            .unwrap()
            .resource_type()
            .collection_name(),
        "caches"
    );

    let instance = Resource::new("Test::Server", AttributeBag::new(), Params::new());
    let caches = instance
        .resolve(&api, "caches", FindOptions::new())
        .await
        .unwrap();

    assert_eq!(caches.len(), 1);
    assert_eq!(caches.resources()[0].type_name(), "Test::Cache");
}
