//! Threshold values: the health indicators of an application.
//!
//! Each value reports one metric (CPU, memory, response time, ...) together
//! with its threshold level:
//!
//! | `threshold_value` | [`Color`]  |
//! |-------------------|------------|
//! | 0 (not reporting) | Gray       |
//! | 1                 | Green      |
//! | 2                 | Yellow     |
//! | 3                 | Red        |

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::resources::{ACCOUNT_APPLICATION_RESOURCE_PATH, NAMESPACE};
use crate::rest::{Resource, ResourceType};

/// `NewRelicApi::ThresholdValue`.
#[must_use]
pub fn threshold_value_type() -> ResourceType {
    ResourceType::builder(NAMESPACE, "ThresholdValue")
        .prefix(ACCOUNT_APPLICATION_RESOURCE_PATH)
        .build()
}

/// Health color of a threshold level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Not reporting.
    Gray,
    /// Healthy.
    Green,
    /// Warning.
    Yellow,
    /// Critical.
    Red,
}

impl Color {
    /// Maps a threshold level to its color. Unknown levels are gray.
    #[must_use]
    pub const fn from_level(level: i64) -> Self {
        match level {
            3 => Self::Red,
            2 => Self::Yellow,
            1 => Self::Green,
            _ => Self::Gray,
        }
    }

    /// Returns the color name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gray => "Gray",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed read access to a threshold value resource.
///
/// # Example
///
/// ```rust
/// use newrelic_api::resources::{Color, ThresholdValue, THRESHOLD_VALUE};
/// use newrelic_api::rest::{AttributeBag, Params, Resource};
/// use serde_json::json;
///
/// let fields = json!({
///     "name": "CPU",
///     "threshold_value": "2",
///     "metric_value": "61.5",
///     "formatted_metric_value": "61.5%",
/// });
/// let resource = Resource::new(
///     THRESHOLD_VALUE,
///     AttributeBag::from_fields(fields.as_object().unwrap().clone()),
///     Params::new(),
/// );
///
/// let value = ThresholdValue::new(&resource);
/// assert_eq!(value.color_value(), Color::Yellow);
/// assert_eq!(value.to_string(), "CPU: Yellow (61.5%)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThresholdValue<'a> {
    resource: &'a Resource,
}

impl<'a> ThresholdValue<'a> {
    /// Wraps a resource of type `NewRelicApi::ThresholdValue`.
    #[must_use]
    pub const fn new(resource: &'a Resource) -> Self {
        Self { resource }
    }

    /// The name of the threshold setting.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.resource.str_value("name")
    }

    /// The threshold level, 0 to 3. Missing or unparseable values are 0.
    #[must_use]
    pub fn threshold_value(&self) -> i64 {
        match self.resource.value("threshold_value") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(truncate))
                .unwrap_or(0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| s.trim().parse::<f64>().ok().map(truncate))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// The measured metric. Missing or unparseable values are 0.0.
    #[must_use]
    pub fn metric_value(&self) -> f64 {
        match self.resource.value("metric_value") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// The metric as formatted by the server, or the raw metric when the
    /// server sent none.
    #[must_use]
    pub fn formatted_metric_value(&self) -> String {
        self.resource
            .str_value("formatted_metric_value")
            .map_or_else(|| self.metric_value().to_string(), ToString::to_string)
    }

    /// The health color of the threshold level.
    #[must_use]
    pub fn color_value(&self) -> Color {
        Color::from_level(self.threshold_value())
    }

    /// Start of the evaluation period.
    ///
    /// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS [+ZZZZ]`; times without an
    /// offset are taken as UTC.
    #[must_use]
    pub fn begin_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.resource.str_value("begin_time")?.trim();

        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

impl fmt::Display for ThresholdValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.name().unwrap_or_default(),
            self.color_value(),
            self.formatted_metric_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::THRESHOLD_VALUE;
    use crate::rest::{AttributeBag, Params};
    use chrono::Datelike;
    use serde_json::json;

    fn resource(fields: Value) -> Resource {
        let bag = match fields {
            Value::Object(map) => AttributeBag::from_fields(map),
            _ => AttributeBag::new(),
        };
        Resource::new(THRESHOLD_VALUE, bag, Params::new())
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(Color::from_level(0), Color::Gray);
        assert_eq!(Color::from_level(1), Color::Green);
        assert_eq!(Color::from_level(2), Color::Yellow);
        assert_eq!(Color::from_level(3), Color::Red);
        assert_eq!(Color::from_level(9), Color::Gray);
        assert_eq!(Color::from_level(-1), Color::Gray);
    }

    #[test]
    fn test_threshold_value_accepts_strings_and_numbers() {
        let value = resource(json!({"threshold_value": "3"}));
        assert_eq!(ThresholdValue::new(&value).threshold_value(), 3);

        let value = resource(json!({"threshold_value": 1}));
        assert_eq!(ThresholdValue::new(&value).threshold_value(), 1);

        let value = resource(json!({"threshold_value": "junk"}));
        assert_eq!(ThresholdValue::new(&value).threshold_value(), 0);

        let value = resource(json!({}));
        assert_eq!(ThresholdValue::new(&value).color_value(), Color::Gray);
    }

    #[test]
    fn test_metric_value_is_float() {
        let value = resource(json!({"metric_value": "0.25"}));
        assert!((ThresholdValue::new(&value).metric_value() - 0.25).abs() < f64::EPSILON);

        let value = resource(json!({"metric_value": 12}));
        assert!((ThresholdValue::new(&value).metric_value() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_formatted_metric_value_falls_back_to_metric() {
        let value = resource(json!({"metric_value": 1.5}));
        assert_eq!(ThresholdValue::new(&value).formatted_metric_value(), "1.5");
    }

    #[test]
    fn test_display() {
        let value = resource(json!({
            "name": "Apdex",
            "threshold_value": 1,
            "metric_value": 0.98,
            "formatted_metric_value": "0.98 [0.5]"
        }));
        assert_eq!(
            ThresholdValue::new(&value).to_string(),
            "Apdex: Green (0.98 [0.5])"
        );
    }

    #[test]
    fn test_begin_time_formats() {
        let value = resource(json!({"begin_time": "2009-08-05T10:00:00Z"}));
        let time = ThresholdValue::new(&value).begin_time().unwrap();
        assert_eq!(time.year(), 2009);

        let value = resource(json!({"begin_time": "2009-08-05 10:00:00 -0700"}));
        let time = ThresholdValue::new(&value).begin_time().unwrap();
        assert_eq!(time.to_rfc3339(), "2009-08-05T17:00:00+00:00");

        let value = resource(json!({"begin_time": "2009-08-05 10:00:00"}));
        assert!(ThresholdValue::new(&value).begin_time().is_some());

        let value = resource(json!({"begin_time": "yesterday"}));
        assert!(ThresholdValue::new(&value).begin_time().is_none());
    }
}
