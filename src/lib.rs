//! # New Relic API
//!
//! A typed client for the New Relic v1 REST API: accounts, applications,
//! agents, threshold values, deployments and the rest of the v1 catalogue,
//! mapped onto find and create requests authenticated with an account API
//! key.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for the API key, host and proxy
//! - A generic resource engine ([`rest`]): path templates, a type registry,
//!   has-many relationships resolved lazily and scoped by their parent
//! - The New Relic resource catalogue ([`resources`])
//! - An async HTTP transport ([`clients`])
//!
//! ## Quick Start
//!
//! ```rust
//! use newrelic_api::{ApiConfig, ApiKey, NewRelicApi};
//!
//! let config = ApiConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let api = NewRelicApi::with_default_resources(config).unwrap();
//! assert_eq!(api.registry().len(), 9);
//! ```
//!
//! ## Walking relationships
//!
//! Relationships are resolved on instances. A relationship that arrived
//! inline with its parent is returned without a request; otherwise one
//! request is made, scoped by the parent chain:
//!
//! ```rust,ignore
//! use newrelic_api::resources::{ThresholdValue, ACCOUNT};
//! use newrelic_api::rest::{FindOptions, Selector};
//!
//! // GET /api/v1/accounts/
//! let account = api.resource(ACCOUNT)?.first().await?;
//!
//! // GET /api/v1/accounts/{account_id}/applications/
//! let apps = account.resolve(&api, "applications", FindOptions::new()).await?;
//!
//! for app in apps.resources() {
//!     // GET /api/v1/accounts/{account_id}/applications/{app_id}/threshold_values/
//!     let values = app.resolve(&api, "threshold_values", FindOptions::new()).await?;
//!     for value in values.resources() {
//!         println!("{}", ThresholdValue::new(value));
//!     }
//! }
//!
//! // Find one application by name
//! let options = FindOptions::new()
//!     .selector(Selector::First)
//!     .param("conditions", serde_json::json!({"name": "My App"}));
//! let app = account.resolve(&api, "applications", options).await?;
//! ```
//!
//! ## Changing sites
//!
//! Each defined type snapshots the site it talks to. After changing the
//! host, port, TLS flag or proxy, call [`NewRelicApi::reset_all`]:
//!
//! ```rust
//! use newrelic_api::{ApiConfig, Host, NewRelicApi};
//!
//! let mut api = NewRelicApi::with_default_resources(ApiConfig::default()).unwrap();
//! api.config_mut().set_host(Some(Host::new("localhost").unwrap()));
//! api.config_mut().set_port(Some(3000));
//!
//! let site = api.reset_all().unwrap();
//! assert_eq!(site.to_string(), "http://localhost:3000");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and registered types live in a
//!   [`NewRelicApi`] handle passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Explicit propagation**: Site changes apply on reset, never implicitly

mod api;

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod rest;

pub use api::{NewRelicApi, ResourceHandle};
pub use config::{ApiConfig, ApiConfigBuilder, ApiKey, Host, ProxyUrl, SiteUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, ResponseKind,
};

// Re-export the types most callers touch
pub use rest::{FindOptions, Found, Params, Related, Resource, ResourceError, Selector};
