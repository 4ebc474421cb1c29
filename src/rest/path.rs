//! Path templates for REST resources.
//!
//! Resource types locate their collections below a prefix such as
//! `/api/v1/accounts/:account_id/`. A [`PathTemplate`] splits such a prefix
//! into literal text and `:name` placeholders once, so it can be resolved
//! against many parameter maps.
//!
//! # Placeholders
//!
//! A placeholder is a `:` followed by one or more of `[A-Za-z0-9_]`. A `:`
//! not followed by such a character is literal text.
//!
//! # Example
//!
//! ```rust
//! use newrelic_api::rest::{Params, PathTemplate};
//! use serde_json::json;
//!
//! let template = PathTemplate::compile("/accounts/:account_id/");
//! let nested = template.join("applications/:application_id/");
//!
//! let mut params = Params::new();
//! params.insert("account_id".to_string(), json!(7));
//! params.insert("application_id".to_string(), json!("42"));
//!
//! assert_eq!(nested.resolve(&params).unwrap(), "/accounts/7/applications/42/");
//! ```

use std::fmt;

use serde_json::Value;

use crate::rest::errors::ResourceError;
use crate::rest::query::Params;

/// A piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled URL template with named `:placeholder` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl PathTemplate {
    /// Compiles a template.
    ///
    /// Compilation never fails; text that is not a placeholder is kept
    /// verbatim.
    #[must_use]
    pub fn compile(template: impl Into<String>) -> Self {
        let source = template.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ':' && chars.peek().copied().is_some_and(is_name_char) {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Param(name));
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { source, segments }
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the template has a placeholder with this name.
    #[must_use]
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Builds a nested template by appending `relative` to this one.
    #[must_use]
    pub fn join(&self, relative: &str) -> Self {
        Self::compile(format!("{}{relative}", self.source))
    }

    /// Substitutes every placeholder with its value from `params`.
    ///
    /// Strings are used verbatim, other scalars through their JSON display
    /// form; all values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingPathParameter`] if a placeholder has no
    /// entry in `params` or maps to `null`.
    pub fn resolve(&self, params: &Params) -> Result<String, ResourceError> {
        let mut path = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = match params.get(name) {
                        None | Some(Value::Null) => {
                            return Err(ResourceError::MissingPathParameter {
                                template: self.source.clone(),
                                parameter: name.clone(),
                            })
                        }
                        Some(value) => value,
                    };
                    path.push_str(&urlencoding::encode(&path_value(value)));
                }
            }
        }

        Ok(path)
    }
}

/// Renders a parameter value for use in a path segment.
pub(crate) fn path_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::compile(template)
    }
}

// Verify PathTemplate is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PathTemplate>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        crate::rest::query::params_from_json(value)
    }

    #[test]
    fn test_compile_extracts_placeholders_in_order() {
        let template =
            PathTemplate::compile("/api/v1/accounts/:account_id/applications/:application_id/");
        let names: Vec<&str> = template.placeholders().collect();
        assert_eq!(names, vec!["account_id", "application_id"]);
        assert!(template.has_placeholder("account_id"));
        assert!(!template.has_placeholder("id"));
    }

    #[test]
    fn test_template_without_placeholders_resolves_verbatim() {
        let template = PathTemplate::compile("/api/v1/");
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.resolve(&Params::new()).unwrap(), "/api/v1/");
    }

    #[test]
    fn test_lone_colon_is_literal() {
        let template = PathTemplate::compile("/a:/b");
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.resolve(&Params::new()).unwrap(), "/a:/b");
    }

    #[test]
    fn test_resolve_substitutes_strings_and_numbers() {
        let template = PathTemplate::compile("/accounts/:account_id/applications/:application_id/");
        let resolved = template
            .resolve(&params(json!({"account_id": 7, "application_id": "42"})))
            .unwrap();
        assert_eq!(resolved, "/accounts/7/applications/42/");
    }

    #[test]
    fn test_resolve_percent_encodes_values() {
        let template = PathTemplate::compile("/accounts/:account_id/");
        let resolved = template
            .resolve(&params(json!({"account_id": "gold app/1"})))
            .unwrap();
        assert_eq!(resolved, "/accounts/gold%20app%2F1/");
    }

    #[test]
    fn test_resolve_fails_on_absent_parameter() {
        let template = PathTemplate::compile("/accounts/:account_id/");
        let result = template.resolve(&Params::new());

        assert!(matches!(
            result,
            Err(ResourceError::MissingPathParameter { ref template, ref parameter })
                if template == "/accounts/:account_id/" && parameter == "account_id"
        ));
    }

    #[test]
    fn test_resolve_fails_on_null_parameter() {
        let template = PathTemplate::compile("/accounts/:account_id/");
        let result = template.resolve(&params(json!({"account_id": null})));
        assert!(matches!(
            result,
            Err(ResourceError::MissingPathParameter { .. })
        ));
    }

    #[test]
    fn test_join_concatenates_templates() {
        let base = PathTemplate::compile("/accounts/:account_id/");
        let nested = base.join("agents/:agent_id/");

        assert_eq!(nested.as_str(), "/accounts/:account_id/agents/:agent_id/");
        assert_eq!(nested.placeholders().count(), 2);
    }

    #[test]
    fn test_extra_params_are_ignored() {
        let template = PathTemplate::compile("/accounts/:account_id/");
        let resolved = template
            .resolve(&params(json!({"account_id": 1, "include": "x"})))
            .unwrap();
        assert_eq!(resolved, "/accounts/1/");
    }
}
