//! Report descriptors

use crate::metadata::PatientIdentifierType;
use crate::provider::MetadataProvider;
use kenyacore_report_diagnostics::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Common read-only accessors of every report descriptor
pub trait Descriptor {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;
}

/// Metadata describing a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Apps allowed to run the report
    #[serde(default)]
    pub apps: Vec<String>,
}

impl ReportDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            apps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Descriptor for ReportDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Descriptor of a row-per-patient cohort report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortReportDescriptor {
    #[serde(flatten)]
    pub report: ReportDescriptor,
    /// Identifier type shown as an extra column, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_identifier: Option<PatientIdentifierType>,
}

impl CohortReportDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            report: ReportDescriptor::new(id, name),
            display_identifier: None,
        }
    }

    pub fn with_display_identifier(mut self, identifier_type: PatientIdentifierType) -> Self {
        self.display_identifier = Some(identifier_type);
        self
    }

    /// Resolve a configured identifier type uuid through the metadata provider
    pub fn resolve_display_identifier(
        mut self,
        uuid: &str,
        provider: &dyn MetadataProvider,
    ) -> Result<Self> {
        let identifier_type = provider
            .patient_identifier_type(uuid)
            .ok_or_else(|| {
                ReportError::unresolved_identifier_type(uuid).with_context(self.report.name.clone())
            })?;
        self.display_identifier = Some(identifier_type);
        Ok(self)
    }

    pub fn display_identifier(&self) -> Option<&PatientIdentifierType> {
        self.display_identifier.as_ref()
    }
}

impl Descriptor for CohortReportDescriptor {
    fn id(&self) -> &str {
        &self.report.id
    }

    fn name(&self) -> &str {
        &self.report.name
    }

    fn description(&self) -> Option<&str> {
        self.report.description.as_deref()
    }
}
