//! Per-subject data definitions

use crate::converter::DataConverter;
use crate::metadata::{PatientIdentifierType, PersonAttributeType};
use crate::parameter::{Parameter, Parameterizable};
use serde::{Deserialize, Serialize};

/// How to compute one value per subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataDefinition {
    /// The subject's own id
    PatientId,
    /// The subject's preferred name record
    PreferredName,
    /// Age in years
    Age,
    /// Sex / gender code
    Gender,
    /// Most recent attribute of the given type
    ///
    /// `attribute_type` is `None` when the type could not be resolved at
    /// assembly time; evaluating such a definition yields no values.
    #[serde(rename_all = "camelCase")]
    PersonAttribute {
        name: String,
        attribute_type: Option<PersonAttributeType>,
    },
    /// Preferred identifier of any of the given types
    #[serde(rename_all = "camelCase")]
    PatientIdentifier {
        name: String,
        identifier_types: Vec<PatientIdentifierType>,
    },
    /// Another definition whose values are passed through converters
    Converted {
        name: String,
        definition: Box<DataDefinition>,
        converters: Vec<DataConverter>,
    },
}

impl DataDefinition {
    pub fn person_attribute(
        name: impl Into<String>,
        attribute_type: Option<PersonAttributeType>,
    ) -> Self {
        DataDefinition::PersonAttribute {
            name: name.into(),
            attribute_type,
        }
    }

    pub fn patient_identifier(
        name: impl Into<String>,
        identifier_type: PatientIdentifierType,
    ) -> Self {
        DataDefinition::PatientIdentifier {
            name: name.into(),
            identifier_types: vec![identifier_type],
        }
    }

    pub fn converted(
        name: impl Into<String>,
        definition: DataDefinition,
        converters: Vec<DataConverter>,
    ) -> Self {
        DataDefinition::Converted {
            name: name.into(),
            definition: Box::new(definition),
            converters,
        }
    }

    /// The innermost definition, looking through any conversions
    pub fn source(&self) -> &DataDefinition {
        match self {
            DataDefinition::Converted { definition, .. } => definition.source(),
            other => other,
        }
    }

    /// Converters applied by this definition, outermost last
    pub fn converters(&self) -> Vec<&DataConverter> {
        match self {
            DataDefinition::Converted {
                definition,
                converters,
                ..
            } => {
                let mut all = definition.converters();
                all.extend(converters.iter());
                all
            }
            _ => Vec::new(),
        }
    }

    /// Whether every metadata reference in this definition was resolved
    pub fn is_resolved(&self) -> bool {
        match self.source() {
            DataDefinition::PersonAttribute { attribute_type, .. } => attribute_type.is_some(),
            DataDefinition::PatientIdentifier {
                identifier_types, ..
            } => !identifier_types.is_empty(),
            _ => true,
        }
    }
}

impl Parameterizable for DataDefinition {
    fn name(&self) -> &str {
        match self {
            DataDefinition::PatientId => "patientId",
            DataDefinition::PreferredName => "preferredName",
            DataDefinition::Age => "age",
            DataDefinition::Gender => "gender",
            DataDefinition::PersonAttribute { name, .. }
            | DataDefinition::PatientIdentifier { name, .. }
            | DataDefinition::Converted { name, .. } => name,
        }
    }

    fn parameters(&self) -> &[Parameter] {
        &[]
    }
}
