//! Assembler configuration

use kenyacore_report_diagnostics::{KRP0004, ReportError, Result};
use serde::{Deserialize, Serialize};

/// What to do when a metadata reference cannot be resolved at assembly time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedReferencePolicy {
    /// Emit the column with an empty reference and log a warning
    #[default]
    Warn,
    /// Abort assembly with `ReportError::UnresolvedReference`
    Fail,
}

/// Assembler settings. The default reproduces the lenient behaviour:
/// unresolved references become empty lookups and parameters are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssemblerConfig {
    pub unresolved_references: UnresolvedReferencePolicy,
    /// Check that every nested mapping only references dataset parameters
    pub check_parameters: bool,
}

impl AssemblerConfig {
    /// Strict settings: fail on unresolved references and parameter mismatches
    pub fn strict() -> Self {
        Self {
            unresolved_references: UnresolvedReferencePolicy::Fail,
            check_parameters: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReportError::Configuration {
            code: KRP0004,
            message: format!("invalid assembler configuration: {}", e),
        })
    }
}
