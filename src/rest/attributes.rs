//! Attribute storage for resource instances.
//!
//! An [`AttributeBag`] holds what the server returned for one record. Plain
//! fields are kept as JSON values. Relationship fields that arrived inline
//! with the parent (for example the `applications` of an account fetched
//! with `include=application_health`) are kept as materialized
//! [`Resource`] collections.
//!
//! The bag doubles as the relationship cache: a field that is present is
//! returned as-is forever, and a field that is absent is fetched on every
//! request and never stored.

use std::collections::BTreeMap;
use std::future::Future;

use serde_json::Value;

use crate::rest::codec::Fields;
use crate::rest::errors::ResourceError;
use crate::rest::resource::{Found, Resource};

/// A single stored field.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// A plain value, including raw lists that were not materialized.
    Value(Value),
    /// A relationship collection that arrived inline with the record.
    Collection(Vec<Resource>),
}

impl Attribute {
    /// Returns the plain value, if this is one.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Collection(_) => None,
        }
    }

    /// Returns the embedded resources, if this is a collection.
    #[must_use]
    pub fn as_collection(&self) -> Option<&[Resource]> {
        match self {
            Self::Collection(items) => Some(items),
            Self::Value(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Collection(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::Object(item.attributes().to_fields()))
                    .collect(),
            ),
        }
    }
}

/// Field values of one resource instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    fields: BTreeMap<String, Attribute>,
}

impl AttributeBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag holding every field as a plain value.
    #[must_use]
    pub fn from_fields(fields: Fields) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key, Attribute::Value(value)))
                .collect(),
        }
    }

    /// Returns a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Attribute> {
        self.fields.get(field)
    }

    /// Stores a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, attribute: Attribute) {
        self.fields.insert(field.into(), attribute);
    }

    /// Returns `true` if the field is present, whatever its value.
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the bag holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Converts the bag back into plain fields, embedded collections included.
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        self.fields
            .iter()
            .map(|(key, attribute)| (key.clone(), attribute.to_value()))
            .collect()
    }

    /// Returns a relationship's value, fetching it only when absent.
    ///
    /// A present field (an empty collection, `null`, `false` and `0`
    /// included) is returned without calling `resolver`. An absent field
    /// awaits `resolver` once; the result is handed back but not stored, so
    /// the next call fetches again.
    ///
    /// # Errors
    ///
    /// Returns whatever `resolver` fails with.
    pub async fn resolve_relationship<'a, F, Fut>(
        &'a self,
        field: &str,
        resolver: F,
    ) -> Result<Related<'a>, ResourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Found, ResourceError>>,
    {
        if let Some(attribute) = self.fields.get(field) {
            tracing::debug!(relationship = field, "relationship present on instance");
            return Ok(Related::Embedded(attribute));
        }

        tracing::debug!(relationship = field, "relationship absent; fetching");
        resolver().await.map(Related::Fetched)
    }
}

/// The result of resolving a relationship.
#[derive(Debug, Clone, PartialEq)]
pub enum Related<'a> {
    /// The field arrived with the instance and is returned as stored.
    Embedded(&'a Attribute),
    /// The field was fetched by a nested request.
    Fetched(Found),
}

impl Related<'_> {
    /// Returns `true` if no request was made.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }

    /// Returns the related resources.
    ///
    /// An embedded plain value (a raw list, `null`, ...) has no resources.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        match self {
            Self::Embedded(attribute) => attribute.as_collection().unwrap_or_default(),
            Self::Fetched(found) => found.as_slice(),
        }
    }

    /// Returns the embedded plain value, if that is what was stored.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Embedded(attribute) => attribute.as_value(),
            Self::Fetched(_) => None,
        }
    }

    /// Returns the number of related resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources().len()
    }

    /// Returns `true` if there are no related resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources().is_empty()
    }

    /// Consumes the result, returning owned resources.
    #[must_use]
    pub fn into_resources(self) -> Vec<Resource> {
        match self {
            Self::Embedded(attribute) => attribute
                .as_collection()
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
            Self::Fetched(found) => found.into_vec(),
        }
    }
}
