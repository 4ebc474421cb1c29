//! Resource types and instances.
//!
//! A [`ResourceType`] describes one kind of record the API serves: where its
//! collection lives, which relationships it declares and how an instance
//! scopes nested requests. A [`Resource`] is one record of such a type.
//!
//! # Defining a type
//!
//! ```rust
//! use newrelic_api::rest::{Params, ResourceType};
//! use serde_json::json;
//!
//! let application = ResourceType::builder("NewRelicApi", "Application")
//!     .prefix("/api/v1/accounts/:account_id/")
//!     .has_many(&["agents", "threshold_values"])
//!     .scope(|app| {
//!         let mut scope = Params::new();
//!         let account_id = app.prefix_option("account_id").cloned();
//!         scope.insert("account_id".into(), account_id.unwrap_or_default());
//!         scope.insert("application_id".into(), app.id().map(Into::into).unwrap_or_default());
//!         scope
//!     })
//!     .build();
//!
//! assert_eq!(application.qualified_name(), "NewRelicApi::Application");
//! assert_eq!(application.collection_name(), "applications");
//! assert!(application.declares("threshold_values"));
//! ```
//!
//! # Instances
//!
//! Instances are created by finds and creates. They carry the qualified name
//! of their type rather than the type itself; the type is looked up in the
//! [`NewRelicApi`] registry whenever a relationship is resolved.

use std::fmt;

use serde_json::Value;

use crate::api::NewRelicApi;
use crate::rest::attributes::{Attribute, AttributeBag, Related};
use crate::rest::errors::ResourceError;
use crate::rest::inflect;
use crate::rest::path::{path_value, PathTemplate};
use crate::rest::query::Params;
use crate::rest::relationship::RelationshipResolver;

/// Computes the parameters that scope nested requests made from an instance.
pub type ScopeFn = fn(&Resource) -> Params;

fn no_scope(_: &Resource) -> Params {
    Params::new()
}

/// Which records a find returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every record of the collection.
    All,
    /// The first record of the collection.
    First,
    /// The single record the collection path returns.
    One,
    /// The record with this id, fetched from its element path.
    Id(String),
}

impl Selector {
    /// Creates an [`Selector::Id`] from anything displayable.
    #[must_use]
    pub fn id(id: impl fmt::Display) -> Self {
        Self::Id(id.to_string())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::First => f.write_str("first"),
            Self::One => f.write_str("one"),
            Self::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// The records a find returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    /// A single record (`First`, `One`, `Id`).
    One(Resource),
    /// Every record (`All`); possibly empty.
    Many(Vec<Resource>),
}

impl Found {
    /// Returns the records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Resource] {
        match self {
            Self::One(resource) => std::slice::from_ref(resource),
            Self::Many(resources) => resources,
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Returns the first record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Resource> {
        self.as_slice().first()
    }

    /// Consumes the result, returning every record.
    #[must_use]
    pub fn into_vec(self) -> Vec<Resource> {
        match self {
            Self::One(resource) => vec![resource],
            Self::Many(resources) => resources,
        }
    }

    /// Consumes the result, returning the single record of a `One`.
    #[must_use]
    pub fn into_one(self) -> Option<Resource> {
        match self {
            Self::One(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }
}

/// Selector and parameters for a relationship fetch.
///
/// # Example
///
/// ```rust
/// use newrelic_api::rest::{FindOptions, Selector};
/// use serde_json::json;
///
/// let options = FindOptions::new()
///     .selector(Selector::First)
///     .param("conditions", json!({"name": "My App"}));
///
/// assert_eq!(options.selector_or_default(), Selector::First);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    selector: Option<Selector>,
    params: Params,
}

impl FindOptions {
    /// Creates options selecting `All` with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selector.
    #[must_use]
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Returns the selector, `All` when none was set.
    #[must_use]
    pub fn selector_or_default(&self) -> Selector {
        self.selector.clone().unwrap_or(Selector::All)
    }

    /// Splits the options into selector and parameters.
    #[must_use]
    pub fn into_parts(self) -> (Selector, Params) {
        (self.selector.unwrap_or(Selector::All), self.params)
    }
}

/// A registered kind of record.
///
/// Types are immutable once built; use [`ResourceType::builder`].
#[derive(Clone)]
pub struct ResourceType {
    name: String,
    namespace: String,
    qualified_name: String,
    collection_name: String,
    element_name: String,
    prefix: PathTemplate,
    relationships: Vec<String>,
    scope: ScopeFn,
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("qualified_name", &self.qualified_name)
            .field("collection_name", &self.collection_name)
            .field("prefix", &self.prefix.as_str())
            .field("relationships", &self.relationships)
            .finish_non_exhaustive()
    }
}

impl ResourceType {
    /// Starts a type named `name` inside `namespace`.
    ///
    /// The namespace is a `::`-separated path such as `NewRelicApi` or
    /// `NewRelicApi::Account`; it may be empty.
    #[must_use]
    pub fn builder(namespace: impl Into<String>, name: impl Into<String>) -> ResourceTypeBuilder {
        ResourceTypeBuilder::new(namespace.into(), name.into())
    }

    /// The bare type name, e.g. `Agent`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The enclosing namespace, e.g. `NewRelicApi::Application`.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The namespace-qualified name, e.g. `NewRelicApi::Application::Agent`.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The plural path segment, e.g. `agents`.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// The singular body root, e.g. `agent`.
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The prefix template the collection lives under.
    #[must_use]
    pub const fn prefix(&self) -> &PathTemplate {
        &self.prefix
    }

    /// The declared relationship fields.
    #[must_use]
    pub fn relationships(&self) -> &[String] {
        &self.relationships
    }

    /// Returns `true` if the type declares this relationship.
    #[must_use]
    pub fn declares(&self, relationship: &str) -> bool {
        self.relationships.iter().any(|r| r == relationship)
    }

    /// Returns the parameters scoping nested requests made from `instance`.
    #[must_use]
    pub fn scope_params(&self, instance: &Resource) -> Params {
        (self.scope)(instance)
    }

    /// Builds the collection path, e.g. `/api/v1/accounts/1/applications/`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingPathParameter`] if `params` lacks a
    /// prefix placeholder.
    pub fn collection_path(&self, params: &Params) -> Result<String, ResourceError> {
        Ok(format!(
            "{}{}/",
            self.prefix.resolve(params)?,
            self.collection_name
        ))
    }

    /// Builds the element path, e.g. `/api/v1/accounts/1/applications/5/`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingPathParameter`] if `params` lacks a
    /// prefix placeholder.
    pub fn element_path(&self, id: &str, params: &Params) -> Result<String, ResourceError> {
        Ok(format!(
            "{}{}/{}/",
            self.prefix.resolve(params)?,
            self.collection_name,
            urlencoding::encode(id)
        ))
    }

    /// Splits `params` into prefix options and everything else.
    #[must_use]
    pub fn split_params(&self, params: Params) -> (Params, Params) {
        params
            .into_iter()
            .partition(|(key, _)| self.prefix.has_placeholder(key))
    }
}

/// Builder for [`ResourceType`].
///
/// # Defaults
///
/// - `prefix`: `/`
/// - `collection_name`: the plural of the underscored name
/// - `element_name`: the underscored name
/// - relationships: none
/// - `scope`: no parameters
#[derive(Debug)]
pub struct ResourceTypeBuilder {
    name: String,
    namespace: String,
    prefix: Option<PathTemplate>,
    collection_name: Option<String>,
    element_name: Option<String>,
    relationships: Vec<String>,
    scope: Option<ScopeFn>,
}

impl ResourceTypeBuilder {
    const fn new(namespace: String, name: String) -> Self {
        Self {
            name,
            namespace,
            prefix: None,
            collection_name: None,
            element_name: None,
            relationships: Vec::new(),
            scope: None,
        }
    }

    /// Sets the prefix template.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<PathTemplate>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Overrides the collection path segment.
    #[must_use]
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }

    /// Overrides the element body root.
    #[must_use]
    pub fn element_name(mut self, name: impl Into<String>) -> Self {
        self.element_name = Some(name.into());
        self
    }

    /// Declares has-many relationships by plural field name.
    #[must_use]
    pub fn has_many(mut self, relationships: &[&str]) -> Self {
        self.relationships
            .extend(relationships.iter().map(|r| (*r).to_string()));
        self
    }

    /// Sets the query-parameter contract for nested requests.
    #[must_use]
    pub fn scope(mut self, scope: ScopeFn) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Builds the type.
    #[must_use]
    pub fn build(self) -> ResourceType {
        let element_name = self
            .element_name
            .unwrap_or_else(|| inflect::underscore(&self.name));
        let collection_name = self
            .collection_name
            .unwrap_or_else(|| inflect::pluralize(&element_name));
        let qualified_name = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        };

        ResourceType {
            name: self.name,
            namespace: self.namespace,
            qualified_name,
            collection_name,
            element_name,
            prefix: self.prefix.unwrap_or_else(|| PathTemplate::compile("/")),
            relationships: self.relationships,
            scope: self.scope.unwrap_or(no_scope),
        }
    }
}

/// One record of a registered type.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    type_name: String,
    attributes: AttributeBag,
    prefix_options: Params,
    errors: Vec<String>,
}

impl Resource {
    /// Creates an instance of the type with this qualified name.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        attributes: AttributeBag,
        prefix_options: Params,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            attributes,
            prefix_options,
            errors: Vec::new(),
        }
    }

    /// Attaches server-reported validation errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// The qualified name of this instance's type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The `id` field rendered as a string.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.value("id")? {
            Value::Null => None,
            value => Some(path_value(value)),
        }
    }

    /// Returns a stored field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Attribute> {
        self.attributes.get(field)
    }

    /// Returns a stored plain value.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field).and_then(Attribute::as_value)
    }

    /// Returns a stored string value.
    #[must_use]
    pub fn str_value(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(Value::as_str)
    }

    /// All stored fields.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Mutable access to the stored fields.
    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    /// The values substituted into the type's prefix when this record was fetched.
    #[must_use]
    pub const fn prefix_options(&self) -> &Params {
        &self.prefix_options
    }

    /// Returns a single prefix option.
    #[must_use]
    pub fn prefix_option(&self, key: &str) -> Option<&Value> {
        self.prefix_options.get(key)
    }

    /// Validation errors reported by the server on create.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns `true` if the server reported no validation errors.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Resolves a declared relationship.
    ///
    /// Returns the stored field if it arrived with this record; otherwise
    /// issues one nested find scoped by this record.
    ///
    /// # Errors
    ///
    /// See [`RelationshipResolver::resolve`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let account = api.resource(ACCOUNT)?.first().await?;
    /// let applications = account.resolve(&api, "applications", FindOptions::new()).await?;
    /// ```
    pub async fn resolve<'a>(
        &'a self,
        api: &NewRelicApi,
        relationship: &str,
        options: FindOptions,
    ) -> Result<Related<'a>, ResourceError> {
        RelationshipResolver::resolve(api, self, relationship, options).await
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceType>();
    assert_send_sync::<Resource>();
    assert_send_sync::<Found>();
    assert_send_sync::<Selector>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::query::params_from_json;
    use serde_json::json;

    fn fields(value: Value) -> AttributeBag {
        match value {
            Value::Object(map) => AttributeBag::from_fields(map),
            _ => panic!("expected an object"),
        }
    }

    fn account_scope(account: &Resource) -> Params {
        params_from_json(json!({ "account_id": account.id() }))
    }

    #[test]
    fn test_builder_derives_names_from_type_name() {
        let ty = ResourceType::builder("NewRelicApi::Account", "AccountView").build();

        assert_eq!(ty.name(), "AccountView");
        assert_eq!(ty.namespace(), "NewRelicApi::Account");
        assert_eq!(ty.qualified_name(), "NewRelicApi::Account::AccountView");
        assert_eq!(ty.element_name(), "account_view");
        assert_eq!(ty.collection_name(), "account_views");
        assert_eq!(ty.prefix().as_str(), "/");
    }

    #[test]
    fn test_builder_overrides() {
        let ty = ResourceType::builder("", "Person")
            .collection_name("staff")
            .element_name("member")
            .build();

        assert_eq!(ty.qualified_name(), "Person");
        assert_eq!(ty.collection_name(), "staff");
        assert_eq!(ty.element_name(), "member");
    }

    #[test]
    fn test_collection_and_element_paths() {
        let ty = ResourceType::builder("NewRelicApi", "Application")
            .prefix("/api/v1/accounts/:account_id/")
            .build();
        let params = params_from_json(json!({"account_id": 1}));

        assert_eq!(
            ty.collection_path(&params).unwrap(),
            "/api/v1/accounts/1/applications/"
        );
        assert_eq!(
            ty.element_path("5", &params).unwrap(),
            "/api/v1/accounts/1/applications/5/"
        );
        assert!(matches!(
            ty.collection_path(&Params::new()),
            Err(ResourceError::MissingPathParameter { .. })
        ));
    }

    #[test]
    fn test_split_params_separates_prefix_options() {
        let ty = ResourceType::builder("NewRelicApi", "Application")
            .prefix("/api/v1/accounts/:account_id/")
            .build();
        let (prefix, query) =
            ty.split_params(params_from_json(json!({"account_id": 1, "include": "x"})));

        assert_eq!(prefix, params_from_json(json!({"account_id": 1})));
        assert_eq!(query, params_from_json(json!({"include": "x"})));
    }

    #[test]
    fn test_scope_contract_defaults_to_empty() {
        let ty = ResourceType::builder("NewRelicApi", "User").build();
        let user = Resource::new(ty.qualified_name(), fields(json!({"id": 1})), Params::new());
        assert!(ty.scope_params(&user).is_empty());
    }

    #[test]
    fn test_scope_contract_is_applied() {
        let ty = ResourceType::builder("NewRelicApi", "Account")
            .has_many(&["applications"])
            .scope(account_scope)
            .build();
        let account = Resource::new(ty.qualified_name(), fields(json!({"id": 44})), Params::new());

        assert!(ty.declares("applications"));
        assert!(!ty.declares("agents"));
        assert_eq!(
            ty.scope_params(&account),
            params_from_json(json!({"account_id": "44"}))
        );
    }

    #[test]
    fn test_resource_accessors() {
        let resource = Resource::new(
            "NewRelicApi::Application",
            fields(json!({"id": 5, "name": "gold app"})),
            params_from_json(json!({"account_id": 1})),
        );

        assert_eq!(resource.id(), Some("5".to_string()));
        assert_eq!(resource.str_value("name"), Some("gold app"));
        assert_eq!(resource.prefix_option("account_id"), Some(&json!(1)));
        assert!(resource.valid());

        let invalid = resource.with_errors(vec!["application is not found".to_string()]);
        assert!(!invalid.valid());
        assert_eq!(invalid.errors().len(), 1);
    }

    #[test]
    fn test_null_id_is_absent() {
        let resource = Resource::new("X", fields(json!({"id": null})), Params::new());
        assert_eq!(resource.id(), None);
    }

    #[test]
    fn test_found_helpers() {
        let one = Found::One(Resource::new("X", AttributeBag::new(), Params::new()));
        assert_eq!(one.len(), 1);
        assert!(one.first().is_some());
        assert!(one.clone().into_one().is_some());

        let many = Found::Many(vec![]);
        assert!(many.is_empty());
        assert!(many.into_one().is_none());
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(Selector::All.to_string(), "all");
        assert_eq!(Selector::id(44).to_string(), "id 44");
    }

    #[test]
    fn test_find_options_default_to_all() {
        let (selector, params) = FindOptions::new().param("include", "x").into_parts();
        assert_eq!(selector, Selector::All);
        assert_eq!(params.len(), 1);
    }
}
