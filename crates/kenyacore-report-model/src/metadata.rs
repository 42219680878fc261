//! Metadata types referenced by data definitions

use serde::{Deserialize, Serialize};

/// Kind of a person attribute, e.g. telephone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttributeType {
    pub uuid: String,
    pub name: String,
    /// Value format, e.g. `java.lang.String`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl PersonAttributeType {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            format: None,
        }
    }
}

/// Kind of a patient identifier, e.g. a clinic number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIdentifierType {
    pub uuid: String,
    /// Display name, also used as the column label for the identifier
    pub name: String,
    /// Validation pattern for identifier values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl PatientIdentifierType {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            format: None,
        }
    }
}
