//! Display converters applied to looked-up values

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// A pure transformation from a raw value to a display value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataConverter {
    /// Render through a `{property}` template
    #[serde(rename_all = "camelCase")]
    ObjectFormatter { pattern: String },
    /// Pull one property off a value of the given type
    #[serde(rename_all = "camelCase")]
    PropertyConverter { type_name: String, property: String },
}

impl DataConverter {
    pub fn formatter(pattern: impl Into<String>) -> Self {
        DataConverter::ObjectFormatter {
            pattern: pattern.into(),
        }
    }

    pub fn property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        DataConverter::PropertyConverter {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Convert one value. `null` always converts to `null`.
    pub fn convert(&self, value: &Value) -> Value {
        if value.is_null() {
            return Value::Null;
        }
        match self {
            DataConverter::ObjectFormatter { pattern } => {
                Value::String(format_object(pattern, value))
            }
            DataConverter::PropertyConverter { property, .. } => match value {
                Value::Object(map) => map.get(property).cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            },
        }
    }
}

/// Apply a converter chain left to right
pub fn convert_all(converters: &[DataConverter], value: &Value) -> Value {
    converters
        .iter()
        .fold(value.clone(), |acc, converter| converter.convert(&acc))
}

fn format_object(pattern: &str, value: &Value) -> String {
    PLACEHOLDER
        .replace_all(pattern, |caps: &Captures<'_>| match value {
            Value::Object(_) => lookup_path(value, caps[1].trim())
                .map(display_value)
                .unwrap_or_default(),
            scalar => display_value(scalar),
        })
        .into_owned()
}

fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
