//! Row-per-subject dataset definitions

use crate::cohort::CohortDefinition;
use crate::converter::DataConverter;
use crate::data::DataDefinition;
use crate::mapped::Mapped;
use crate::parameter::{Parameter, Parameterizable};
use serde::{Deserialize, Serialize};

/// One output column: a label, a mapped per-subject lookup, and display converters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub label: String,
    pub definition: Mapped<DataDefinition>,
    #[serde(default)]
    pub converters: Vec<DataConverter>,
}

/// Rows come from the row filters, columns from per-subject lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub row_filters: Vec<Mapped<CohortDefinition>>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

impl DataSetDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            row_filters: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Append parameters, keeping their order
    pub fn add_parameters(&mut self, parameters: &[Parameter]) {
        self.parameters.extend_from_slice(parameters);
    }

    pub fn add_row_filter(&mut self, cohort: Mapped<CohortDefinition>) {
        self.row_filters.push(cohort);
    }

    /// Append an unmapped column
    pub fn add_column(
        &mut self,
        label: impl Into<String>,
        definition: DataDefinition,
        converters: Vec<DataConverter>,
    ) {
        self.add_column_with_mappings(label, Mapped::unmapped(definition), converters);
    }

    /// Append a column whose lookup binds parameters of this dataset
    pub fn add_column_with_mappings(
        &mut self,
        label: impl Into<String>,
        definition: Mapped<DataDefinition>,
        converters: Vec<DataConverter>,
    ) {
        self.columns.push(ColumnDefinition {
            label: label.into(),
            definition,
            converters,
        });
    }

    pub fn column(&self, label: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }
}

impl Parameterizable for DataSetDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}
