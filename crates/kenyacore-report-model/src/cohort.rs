//! Cohort definitions

use crate::mapped::Mapped;
use crate::parameter::{Parameter, Parameterizable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a cohort selects its subjects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CohortKind {
    /// Every subject in the data store
    AllPatients,
    /// Subject ids returned by a query with `:name` parameter placeholders
    Sql { query: String },
    /// Boolean composition of named sub-cohorts, e.g. `enrolled AND NOT transferredOut`
    Composition {
        search: IndexMap<String, Mapped<CohortDefinition>>,
        expression: String,
    },
}

/// A named, parameterized rule selecting a set of subjects
///
/// Opaque to assembly beyond its name and parameters; evaluation belongs to
/// the cohort engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub kind: CohortKind,
}

impl CohortDefinition {
    pub fn new(name: impl Into<String>, kind: CohortKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            kind,
        }
    }

    pub fn all_patients() -> Self {
        Self::new("All patients", CohortKind::AllPatients)
    }

    pub fn sql(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(name, CohortKind::Sql { query: query.into() })
    }

    /// Start an empty composition; add members with [`CohortDefinition::with_search`]
    pub fn composition(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::new(
            name,
            CohortKind::Composition {
                search: IndexMap::new(),
                expression: expression.into(),
            },
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a named member to a composition. Ignored for other kinds.
    pub fn with_search(mut self, key: impl Into<String>, member: Mapped<CohortDefinition>) -> Self {
        if let CohortKind::Composition { search, .. } = &mut self.kind {
            search.insert(key.into(), member);
        }
        self
    }
}

impl Parameterizable for CohortDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}
