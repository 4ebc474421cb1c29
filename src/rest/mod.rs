//! Resource infrastructure for the New Relic API.
//!
//! This module is the generic engine the resource catalogue is built on:
//!
//! - **[`PathTemplate`]**: prefixes with `:name` placeholders
//! - **[`ResourceType`]** and **[`Resource`]**: type descriptors and instances
//! - **[`ResourceRegistry`]**: defined types, looked up by qualified name
//! - **[`AttributeBag`]**: instance fields and embedded relationship data
//! - **[`RelationshipResolver`]**: scoped nested finds for declared relationships
//! - **[`ResourceClient`]**: per-type connection with `find` and `create`
//! - **[`ResourceCodec`]**: the wire format, [`JsonCodec`] by default
//! - **[`ResourceError`]**: error type for everything above
//!
//! # Relationship resolution
//!
//! ```text
//! account.resolve(&api, "applications", options)
//!   ├─ field present on the account? → return it, no request
//!   └─ otherwise
//!        registry.resolve("applications", Account) → Application
//!        params = options.params ∪ Account.scope(account)   (scope wins)
//!        Application.find(options.selector or All, params)  → one GET
//! ```
//!
//! Fetched results are never stored on the instance; embedded ones are
//! never refetched.

mod attributes;
mod client;
mod codec;
mod errors;
mod path;
mod query;
mod registry;
mod relationship;
mod resource;

pub mod inflect;

// Public exports
pub use attributes::{Attribute, AttributeBag, Related};
pub use client::{ResourceClient, API_KEY_HEADER};
pub use codec::{CodecError, Decoded, Fields, JsonCodec, ResourceCodec, RootNames};
pub use errors::ResourceError;
pub use path::PathTemplate;
pub use query::{params_from_json, to_query_pairs, Params};
pub use registry::{RegisteredType, ResourceRegistry};
pub use relationship::RelationshipResolver;
pub use resource::{
    FindOptions, Found, Resource, ResourceType, ResourceTypeBuilder, ScopeFn, Selector,
};
