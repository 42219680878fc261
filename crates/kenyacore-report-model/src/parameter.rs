//! Report parameters

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type a parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterType {
    Date,
    DateTime,
    Integer,
    Decimal,
    Text,
    Boolean,
    /// A location, referenced by uuid
    Location,
    /// A concept, referenced by uuid
    Concept,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::Date => "Date",
            ParameterType::DateTime => "DateTime",
            ParameterType::Integer => "Integer",
            ParameterType::Decimal => "Decimal",
            ParameterType::Text => "Text",
            ParameterType::Boolean => "Boolean",
            ParameterType::Location => "Location",
            ParameterType::Concept => "Concept",
        };
        f.write_str(name)
    }
}

/// A concrete parameter value, used for defaults and literal mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ParameterValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    /// Reference to a metadata object by uuid
    Reference(String),
}

impl ParameterValue {
    /// Whether this value can be supplied to a parameter of the given type
    pub fn is_compatible_with(&self, kind: ParameterType) -> bool {
        matches!(
            (self, kind),
            (ParameterValue::Date(_), ParameterType::Date)
                | (ParameterValue::DateTime(_), ParameterType::DateTime)
                | (ParameterValue::Date(_), ParameterType::DateTime)
                | (ParameterValue::Integer(_), ParameterType::Integer)
                | (ParameterValue::Integer(_), ParameterType::Decimal)
                | (ParameterValue::Decimal(_), ParameterType::Decimal)
                | (ParameterValue::Text(_), ParameterType::Text)
                | (ParameterValue::Boolean(_), ParameterType::Boolean)
                | (ParameterValue::Reference(_), ParameterType::Location)
                | (ParameterValue::Reference(_), ParameterType::Concept)
        )
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ParameterValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            ParameterValue::Integer(i) => write!(f, "{}", i),
            ParameterValue::Decimal(d) => write!(f, "{}", d),
            ParameterValue::Text(s) => f.write_str(s),
            ParameterValue::Boolean(b) => write!(f, "{}", b),
            ParameterValue::Reference(uuid) => f.write_str(uuid),
        }
    }
}

/// A named, typed input slot of a report or nested definition
///
/// Parameters are identified by name. Order matters to callers (it drives
/// prompt order) so collections of parameters are always kept as `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    /// Display label shown when prompting for a value
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ParameterValue>,
    /// Whether the parameter accepts a collection of values
    #[serde(default)]
    pub allow_multiple: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default_value: None,
            allow_multiple: false,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: ParameterValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Accept a collection of values
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// The expression binding a nested parameter to this one, e.g. `${startDate}`
    pub fn expression(&self) -> String {
        format!("${{{}}}", self.name)
    }
}

/// Anything that declares parameters and can therefore be mapped into a parent
pub trait Parameterizable {
    fn name(&self) -> &str;

    fn parameters(&self) -> &[Parameter];

    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters().iter().find(|p| p.name == name)
    }
}
