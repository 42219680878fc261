//! Assembled report definitions

use crate::dataset::DataSetDefinition;
use crate::mapped::Mapped;
use crate::parameter::{Parameter, Parameterizable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A report's parameters plus its mapped datasets, keyed by dataset name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub data_set_definitions: IndexMap<String, Mapped<DataSetDefinition>>,
}

impl ReportDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            data_set_definitions: IndexMap::new(),
        }
    }

    pub fn add_parameters(&mut self, parameters: &[Parameter]) {
        self.parameters.extend_from_slice(parameters);
    }

    /// Add (or replace) a dataset under the given key
    pub fn add_data_set_definition(
        &mut self,
        key: impl Into<String>,
        dsd: Mapped<DataSetDefinition>,
    ) {
        self.data_set_definitions.insert(key.into(), dsd);
    }

    pub fn data_set_definition(&self, key: &str) -> Option<&Mapped<DataSetDefinition>> {
        self.data_set_definitions.get(key)
    }

    /// Serialize for hand-off to an evaluation engine
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Parameterizable for ReportDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}
