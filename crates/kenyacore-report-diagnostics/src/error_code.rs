//! Report assembly error codes following a structured numbering system
//!
//! Error code ranges:
//! - KRP0001-KRP0099: Configuration errors (builder contract, assembler settings)
//! - KRP0100-KRP0199: Reference errors (unresolved metadata references)
//! - KRP0200-KRP0299: Parameter errors (mapping and binding)
//! - KRP0300-KRP0399: Metadata errors (registry loading and lookup)
//! - KRP0400-KRP0499: System errors (I/O)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    pub const fn is_configuration_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    pub const fn is_reference_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    pub const fn is_parameter_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub const fn is_metadata_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KRP{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Configuration errors (0001-0099)
    map.insert(1, ErrorInfo::new("Invalid builder configuration"));
    map.insert(4, ErrorInfo::new("Invalid assembler configuration"));
    map.insert(5, ErrorInfo::new("Invalid parameter mapping syntax"));

    // Reference errors (0100-0199)
    map.insert(100, ErrorInfo::new("Unresolved person attribute type")
        .with_help("Check that the attribute type is installed in the metadata registry"));
    map.insert(101, ErrorInfo::new("Unresolved patient identifier type")
        .with_help("Check that the identifier type is installed in the metadata registry"));

    // Parameter errors (0200-0299)
    map.insert(200, ErrorInfo::new("Parameter not declared by parent definition")
        .with_help("Every mapped parameter must exist on the report parameter list"));
    map.insert(201, ErrorInfo::new("Duplicate parameter")
        .with_help("Parameter names must be unique within a definition"));
    map.insert(202, ErrorInfo::new("Parameter value does not match parameter type")
        .with_help("Check the default value or literal mapping against the declared type"));

    // Metadata errors (0300-0399)
    map.insert(300, ErrorInfo::new("Metadata load failed"));
    map.insert(301, ErrorInfo::new("Unsupported metadata format"));

    // System errors (0400-0499)
    map.insert(401, ErrorInfo::new("I/O error"));

    map
});

// Configuration errors
pub const KRP0001: ErrorCode = ErrorCode::new(1);
pub const KRP0004: ErrorCode = ErrorCode::new(4);
pub const KRP0005: ErrorCode = ErrorCode::new(5);

// Reference errors
pub const KRP0100: ErrorCode = ErrorCode::new(100);
pub const KRP0101: ErrorCode = ErrorCode::new(101);

// Parameter errors
pub const KRP0200: ErrorCode = ErrorCode::new(200);
pub const KRP0201: ErrorCode = ErrorCode::new(201);
pub const KRP0202: ErrorCode = ErrorCode::new(202);

// Metadata errors
pub const KRP0300: ErrorCode = ErrorCode::new(300);
pub const KRP0301: ErrorCode = ErrorCode::new(301);

// System errors
pub const KRP0401: ErrorCode = ErrorCode::new(401);
