//! Parameter mappings between nested definitions and their parent

use crate::parameter::{Parameter, ParameterValue, Parameterizable};
use indexmap::IndexMap;
use kenyacore_report_diagnostics::{KRP0005, ReportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PARAMETER_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| {
        Regex::new(r"\$\{\s*([A-Za-z_][A-Za-z0-9_]*)[^}]*\}")
            .expect("parameter reference pattern is valid")
    });

/// The value bound to one parameter of a mapped definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum MappedValue {
    /// Expression over the parent's parameters, e.g. `${endDate}`
    Expression(String),
    /// Fixed value independent of the parent
    Literal(ParameterValue),
}

impl MappedValue {
    /// Expression referencing exactly the named parent parameter
    pub fn parameter(name: &str) -> Self {
        MappedValue::Expression(format!("${{{}}}", name))
    }

    /// Parent parameter names referenced by this value
    ///
    /// Only the leading identifier of each `${...}` counts, so `${endDate-6m}`
    /// references `endDate`.
    pub fn referenced_parameters(&self) -> Vec<&str> {
        match self {
            MappedValue::Expression(expr) => PARAMETER_REFERENCE
                .captures_iter(expr)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect(),
            MappedValue::Literal(_) => Vec::new(),
        }
    }
}

/// A definition paired with bindings from its parameters to the parent's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapped<T> {
    pub parameterizable: T,
    #[serde(default)]
    pub parameter_mappings: IndexMap<String, MappedValue>,
}

impl<T> Mapped<T> {
    pub fn new(parameterizable: T, parameter_mappings: IndexMap<String, MappedValue>) -> Self {
        Self {
            parameterizable,
            parameter_mappings,
        }
    }

    /// Map with no bindings at all
    pub fn unmapped(parameterizable: T) -> Self {
        Self::new(parameterizable, IndexMap::new())
    }

    /// Map using the `name=${expr},other=value` shorthand
    ///
    /// Values of the form `${...}` become expressions, anything else a text literal.
    pub fn map(parameterizable: T, mappings: &str) -> Result<Self> {
        Ok(Self::new(parameterizable, parse_mappings(mappings)?))
    }

    /// Add or replace one binding
    pub fn with_mapping(mut self, name: impl Into<String>, value: MappedValue) -> Self {
        self.parameter_mappings.insert(name.into(), value);
        self
    }

    pub fn mapping(&self, name: &str) -> Option<&MappedValue> {
        self.parameter_mappings.get(name)
    }

    /// Parent parameter names referenced by any binding, first-seen order, no duplicates
    pub fn referenced_parameters(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for value in self.parameter_mappings.values() {
            for name in value.referenced_parameters() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

impl<T: Parameterizable> Mapped<T> {
    /// Bind every parameter of the definition to the same-named parent parameter
    pub fn straight_through(parameterizable: T) -> Self {
        let parameter_mappings = straight_through_mappings(&parameterizable);
        Self::new(parameterizable, parameter_mappings)
    }

    /// Parameters of the definition that have no binding
    pub fn unbound_parameters(&self) -> Vec<&Parameter> {
        self.parameterizable
            .parameters()
            .iter()
            .filter(|p| !self.parameter_mappings.contains_key(&p.name))
            .collect()
    }
}

/// `{p: ${p}}` for every parameter `p` of the definition
pub fn straight_through_mappings<T: Parameterizable + ?Sized>(
    parameterizable: &T,
) -> IndexMap<String, MappedValue> {
    parameterizable
        .parameters()
        .iter()
        .map(|p| (p.name.clone(), MappedValue::parameter(&p.name)))
        .collect()
}

/// Parse the `name=value,name=value` mapping shorthand
pub fn parse_mappings(mappings: &str) -> Result<IndexMap<String, MappedValue>> {
    let mut parsed = IndexMap::new();
    for entry in mappings.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, value) = entry.split_once('=').ok_or_else(|| ReportError::Configuration {
            code: KRP0005,
            message: format!("mapping '{}' is not of the form name=value", entry),
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ReportError::Configuration {
                code: KRP0005,
                message: format!("mapping '{}' has no parameter name", entry),
            });
        }

        let value = value.trim();
        let value = if value.starts_with("${") && value.ends_with('}') {
            MappedValue::Expression(value.to_string())
        } else {
            MappedValue::Literal(ParameterValue::Text(value.to_string()))
        };
        parsed.insert(name.to_string(), value);
    }
    Ok(parsed)
}
