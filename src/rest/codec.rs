//! Wire format for resource bodies.
//!
//! The resource layer never parses bodies itself. It asks a
//! [`ResourceCodec`] to turn a response body into field mappings, to encode
//! attributes for a create, and to pull validation messages out of a 422
//! body. [`JsonCodec`] is the codec every [`NewRelicApi`](crate::NewRelicApi)
//! starts with.
//!
//! # Accepted JSON shapes
//!
//! | Body                                | Decoded                   |
//! |-------------------------------------|---------------------------|
//! | empty, whitespace or `null`         | `Many(vec![])`            |
//! | `[{..}, {..}]`                      | `Many`                    |
//! | `{"accounts": [{..}]}` (collection) | `Many`                    |
//! | `{"account": {..}}` (element)       | `One`                     |
//! | any other object                    | `One` (the object itself) |

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::clients::DataType;

/// Field name → value mapping for a single record.
pub type Fields = Map<String, Value>;

/// The records decoded from a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A single record.
    One(Fields),
    /// A list of records (possibly empty).
    Many(Vec<Fields>),
}

impl Decoded {
    /// Returns all records as a list.
    #[must_use]
    pub fn into_records(self) -> Vec<Fields> {
        match self {
            Self::One(fields) => vec![fields],
            Self::Many(records) => records,
        }
    }
}

/// Names a codec may find a body wrapped in.
#[derive(Debug, Clone, Copy)]
pub struct RootNames<'a> {
    /// Singular root, e.g. `account`.
    pub element: &'a str,
    /// Plural root, e.g. `accounts`.
    pub collection: &'a str,
}

/// Errors raised while decoding or encoding bodies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The body is not well-formed.
    #[error("Failed to decode response body: {reason}")]
    InvalidBody {
        /// Parser message.
        reason: String,
    },

    /// The body is well-formed but does not hold records.
    #[error("Expected a record or a list of records, found {found}")]
    UnexpectedShape {
        /// What was found instead.
        found: &'static str,
    },

    /// Attributes could not be encoded.
    #[error("Failed to encode attributes: {reason}")]
    Encode {
        /// Serializer message.
        reason: String,
    },
}

/// Converts between response bodies and field mappings.
pub trait ResourceCodec: fmt::Debug + Send + Sync {
    /// The body type sent with encoded attributes.
    fn data_type(&self) -> DataType;

    /// The MIME type requested with the `Accept` header.
    fn content_type(&self) -> &'static str {
        self.data_type().as_content_type()
    }

    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the body is malformed or holds no records.
    fn decode(&self, body: &str, root: RootNames<'_>) -> Result<Decoded, CodecError>;

    /// Encodes attributes wrapped in the element name.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if the attributes cannot be serialized.
    fn encode(&self, element: &str, fields: &Fields) -> Result<String, CodecError>;

    /// Extracts validation messages from an error body. Never fails; an
    /// unreadable body yields no messages.
    fn decode_errors(&self, body: &str) -> Vec<String>;
}

/// JSON implementation of [`ResourceCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

const fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Unwraps a record wrapped in its element name: `{"account": {..}}`.
/// Any other mapping is returned as is.
pub(crate) fn unwrap_element(mut fields: Fields, element: &str) -> Fields {
    if fields.len() == 1 && matches!(fields.get(element), Some(Value::Object(_))) {
        if let Some(Value::Object(inner)) = fields.remove(element) {
            return inner;
        }
    }
    fields
}

// Items may each be wrapped in the element name: [{"account": {..}}]
fn records(items: Vec<Value>, element: &str) -> Result<Vec<Fields>, CodecError> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(unwrap_element(fields, element)),
            other => Err(CodecError::UnexpectedShape {
                found: shape_name(&other),
            }),
        })
        .collect()
}

/// Unwraps a single-key object named after the collection or element.
fn unwrap_root(mut map: Fields, root: RootNames<'_>) -> Result<Decoded, CodecError> {
    if matches!(map.get(root.collection), Some(Value::Array(_))) {
        if let Some(Value::Array(items)) = map.remove(root.collection) {
            return records(items, root.element).map(Decoded::Many);
        }
    }
    if matches!(map.get(root.element), Some(Value::Object(_))) {
        if let Some(Value::Object(fields)) = map.remove(root.element) {
            return Ok(Decoded::One(fields));
        }
    }
    Ok(Decoded::One(map))
}

impl ResourceCodec for JsonCodec {
    fn data_type(&self) -> DataType {
        DataType::Json
    }

    fn decode(&self, body: &str, root: RootNames<'_>) -> Result<Decoded, CodecError> {
        if body.trim().is_empty() {
            return Ok(Decoded::Many(Vec::new()));
        }

        let value: Value = serde_json::from_str(body).map_err(|e| CodecError::InvalidBody {
            reason: e.to_string(),
        })?;

        match value {
            Value::Null => Ok(Decoded::Many(Vec::new())),
            Value::Array(items) => records(items, root.element).map(Decoded::Many),
            Value::Object(map) if map.len() == 1 => unwrap_root(map, root),
            Value::Object(map) => Ok(Decoded::One(map)),
            other => Err(CodecError::UnexpectedShape {
                found: shape_name(&other),
            }),
        }
    }

    fn encode(&self, element: &str, fields: &Fields) -> Result<String, CodecError> {
        let mut wrapper = Map::with_capacity(1);
        wrapper.insert(element.to_string(), Value::Object(fields.clone()));
        serde_json::to_string(&Value::Object(wrapper)).map_err(|e| CodecError::Encode {
            reason: e.to_string(),
        })
    }

    fn decode_errors(&self, body: &str) -> Vec<String> {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Vec::new();
        };

        let errors = match value {
            Value::Object(mut map) => map.remove("errors").unwrap_or(Value::Null),
            other => other,
        };

        match errors {
            // {"field": ["message", ..]} → "field message"
            Value::Object(map) => map
                .into_iter()
                .flat_map(|(field, messages)| {
                    let messages = match messages {
                        Value::Array(items) => items,
                        other => vec![other],
                    };
                    messages
                        .into_iter()
                        .filter_map(|m| m.as_str().map(|m| format!("{field} {m}")))
                        .collect::<Vec<_>>()
                })
                .collect(),
            Value::Array(items) => items
                .into_iter()
                .filter_map(|m| m.as_str().map(ToString::to_string))
                .collect(),
            Value::String(message) => vec![message],
            _ => Vec::new(),
        }
    }
}

// Verify codec types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JsonCodec>();
    assert_send_sync::<CodecError>();
    assert_send_sync::<Decoded>();
};
