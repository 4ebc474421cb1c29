//! Request parameters and their query-string form.
//!
//! [`Params`] is the one parameter map used throughout the resource layer:
//! caller options, relationship scopes and prefix options are all `Params`.
//! Whatever the path template does not consume is flattened into query
//! pairs in the bracketed style the API expects:
//!
//! - `{"conditions": {"name": "My App"}}` → `conditions[name]=My App`
//! - `{"ids": [1, 2]}` → `ids[]=1&ids[]=2`
//! - `null` values are skipped

use std::collections::BTreeMap;

use serde_json::Value;

/// Parameter map keyed by name.
pub type Params = BTreeMap<String, Value>;

/// Converts a JSON object into [`Params`]. Anything else yields an empty map.
///
/// # Example
///
/// ```rust
/// use newrelic_api::rest::params_from_json;
/// use serde_json::json;
///
/// let params = params_from_json(json!({"include": "application_health"}));
/// assert_eq!(params.len(), 1);
/// ```
#[must_use]
pub fn params_from_json(value: Value) -> Params {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Params::new(),
    }
}

/// Flattens parameters into ordered query pairs.
#[must_use]
pub fn to_query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten_into(&mut pairs, key.clone(), value);
    }
    pairs
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_into(pairs, format!("{key}[]"), item);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                flatten_into(pairs, format!("{key}[{child}]"), item);
            }
        }
    }
}
