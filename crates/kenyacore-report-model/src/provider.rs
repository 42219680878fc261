//! Metadata provider trait used during report assembly

use crate::metadata::{PatientIdentifierType, PersonAttributeType};

/// Read-only lookup of metadata by uuid
///
/// Implementations must support concurrent reads: independent assemblies may
/// share one provider across threads.
pub trait MetadataProvider: Send + Sync {
    /// Get a person attribute type by uuid
    fn person_attribute_type(&self, uuid: &str) -> Option<PersonAttributeType>;

    /// Get a patient identifier type by uuid
    fn patient_identifier_type(&self, uuid: &str) -> Option<PatientIdentifierType>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for std::sync::Arc<P> {
    fn person_attribute_type(&self, uuid: &str) -> Option<PersonAttributeType> {
        (**self).person_attribute_type(uuid)
    }

    fn patient_identifier_type(&self, uuid: &str) -> Option<PatientIdentifierType> {
        (**self).patient_identifier_type(uuid)
    }
}

/// Metadata registry error
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetadataError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Unsupported metadata format: {0}")]
    UnsupportedFormat(String),
}

impl From<MetadataError> for kenyacore_report_diagnostics::ReportError {
    fn from(err: MetadataError) -> Self {
        use kenyacore_report_diagnostics::{KRP0301, KRP0401, ReportError};

        match err {
            MetadataError::Parse(message) => ReportError::metadata(message),
            MetadataError::UnsupportedFormat(message) => ReportError::Metadata {
                code: KRP0301,
                message,
            },
            MetadataError::Io(message) => ReportError::System {
                code: KRP0401,
                message,
            },
        }
    }
}
