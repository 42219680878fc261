//! Metadata registry implementing MetadataProvider
//!
//! This module provides an in-memory `MetadataProvider` loaded from JSON.

use crate::metadata::{PatientIdentifierType, PersonAttributeType};
use crate::provider::{MetadataError, MetadataProvider};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Serialized form of the registry contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    #[serde(default)]
    pub person_attribute_types: Vec<PersonAttributeType>,
    #[serde(default)]
    pub patient_identifier_types: Vec<PatientIdentifierType>,
}

#[derive(Debug, Default)]
struct Metadata {
    attribute_types: HashMap<String, PersonAttributeType>,
    identifier_types: HashMap<String, PatientIdentifierType>,
}

impl From<MetadataDocument> for Metadata {
    fn from(doc: MetadataDocument) -> Self {
        Self {
            attribute_types: doc
                .person_attribute_types
                .into_iter()
                .map(|t| (t.uuid.clone(), t))
                .collect(),
            identifier_types: doc
                .patient_identifier_types
                .into_iter()
                .map(|t| (t.uuid.clone(), t))
                .collect(),
        }
    }
}

/// Metadata registry that implements MetadataProvider
#[derive(Clone, Default)]
pub struct MetadataRegistry {
    metadata: Arc<RwLock<Metadata>>,
}

impl MetadataRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a parsed document
    pub fn from_document(doc: MetadataDocument) -> Self {
        Self {
            metadata: Arc::new(RwLock::new(doc.into())),
        }
    }

    /// Load metadata from a JSON string
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let doc: MetadataDocument =
            serde_json::from_str(json).map_err(|e| MetadataError::Parse(e.to_string()))?;
        Ok(Self::from_document(doc))
    }

    /// Load metadata from a JSON file at runtime
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, MetadataError> {
        let json = std::fs::read_to_string(path).map_err(|e| MetadataError::Io(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Load metadata from a file, checking the extension
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(MetadataError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Expected .json",
                ext
            ))),
            None => Err(MetadataError::UnsupportedFormat(
                "No file extension found. Expected .json".to_string(),
            )),
        }
    }

    /// Register (or replace) a person attribute type
    pub fn register_attribute_type(&self, attribute_type: PersonAttributeType) {
        self.metadata
            .write()
            .attribute_types
            .insert(attribute_type.uuid.clone(), attribute_type);
    }

    /// Register (or replace) a patient identifier type
    pub fn register_identifier_type(&self, identifier_type: PatientIdentifierType) {
        self.metadata
            .write()
            .identifier_types
            .insert(identifier_type.uuid.clone(), identifier_type);
    }

    /// Snapshot of the registry contents, sorted by uuid
    pub fn to_document(&self) -> MetadataDocument {
        let metadata = self.metadata.read();
        let mut doc = MetadataDocument {
            person_attribute_types: metadata.attribute_types.values().cloned().collect(),
            patient_identifier_types: metadata.identifier_types.values().cloned().collect(),
        };
        doc.person_attribute_types.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        doc.patient_identifier_types.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        doc
    }
}

impl MetadataProvider for MetadataRegistry {
    fn person_attribute_type(&self, uuid: &str) -> Option<PersonAttributeType> {
        self.metadata.read().attribute_types.get(uuid).cloned()
    }

    fn patient_identifier_type(&self, uuid: &str) -> Option<PatientIdentifierType> {
        self.metadata.read().identifier_types.get(uuid).cloned()
    }
}
