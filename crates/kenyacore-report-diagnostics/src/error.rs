//! Report assembly error types

use crate::{ErrorCode, KRP0001, KRP0100, KRP0101, KRP0200, KRP0201, KRP0202, KRP0300};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - assembly cannot proceed
    Error,
    /// Warning - definition was assembled but will likely fail at evaluation time
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message about an assembled definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Name of the definition the diagnostic refers to
    pub subject: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Set the definition this diagnostic is about
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(subject) = &self.subject {
            write!(f, " in '{}'", subject)?;
        }
        Ok(())
    }
}

/// Main report assembly error type
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    /// Builder or assembler misconfiguration
    #[error("{code}: {message}")]
    Configuration { code: ErrorCode, message: String },

    /// A metadata reference could not be resolved against the registry
    #[error("{code}: unresolved reference '{reference}'")]
    UnresolvedReference {
        code: ErrorCode,
        reference: String,
        context: Option<String>,
    },

    /// A nested definition maps parameters its parent does not declare
    #[error("{code}: '{definition}' references undeclared parameters: {}", .missing.join(", "))]
    ParameterMismatch {
        code: ErrorCode,
        definition: String,
        missing: Vec<String>,
    },

    /// A declared parameter or its value is invalid
    #[error("{code}: parameter '{parameter}' of '{definition}': {message}")]
    InvalidParameter {
        code: ErrorCode,
        definition: String,
        parameter: String,
        message: String,
    },

    /// Metadata registry error
    #[error("{code}: {message}")]
    Metadata { code: ErrorCode, message: String },

    /// System error
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },

    /// Multiple errors collected
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<ReportError>),
}

impl ReportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            code: KRP0001,
            message: message.into(),
        }
    }

    /// Create an unresolved person attribute type error
    pub fn unresolved_attribute_type(uuid: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            code: KRP0100,
            reference: uuid.into(),
            context: None,
        }
    }

    /// Create an unresolved patient identifier type error
    pub fn unresolved_identifier_type(uuid: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            code: KRP0101,
            reference: uuid.into(),
            context: None,
        }
    }

    /// Create a parameter mismatch error
    pub fn parameter_mismatch(definition: impl Into<String>, missing: Vec<String>) -> Self {
        Self::ParameterMismatch {
            code: KRP0200,
            definition: definition.into(),
            missing,
        }
    }

    /// Create a duplicate parameter error
    pub fn duplicate_parameter(
        definition: impl Into<String>,
        parameter: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            code: KRP0201,
            definition: definition.into(),
            parameter: parameter.into(),
            message: "declared more than once".to_string(),
        }
    }

    /// Create an error for a value that does not fit its parameter's type
    pub fn incompatible_value(
        definition: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            code: KRP0202,
            definition: definition.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a metadata error
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata {
            code: KRP0300,
            message: message.into(),
        }
    }

    /// Attach context to an unresolved reference
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::UnresolvedReference { code, reference, .. } => Self::UnresolvedReference {
                code,
                reference,
                context: Some(context.into()),
            },
            other => other,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { code, .. } => *code,
            Self::UnresolvedReference { code, .. } => *code,
            Self::ParameterMismatch { code, .. } => *code,
            Self::InvalidParameter { code, .. } => *code,
            Self::Metadata { code, .. } => *code,
            Self::System { code, .. } => *code,
            Self::Multiple(errors) => errors.first().map(|e| e.code()).unwrap_or(ErrorCode::new(0)),
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Configuration { code, message }
            | Self::Metadata { code, message }
            | Self::System { code, message } => Diagnostic::error(*code, message.clone()),
            Self::UnresolvedReference { code, reference, context } => {
                let message = format!("unresolved reference '{}'", reference);
                let mut diag = Diagnostic::error(*code, message);
                if let Some(ctx) = context {
                    diag = diag.with_subject(ctx.clone());
                }
                if let Some(help) = code.info().help {
                    diag = diag.with_help(help);
                }
                diag
            }
            Self::ParameterMismatch { code, definition, missing } => Diagnostic::error(
                *code,
                format!("undeclared parameters: {}", missing.join(", ")),
            )
            .with_subject(definition.clone()),
            Self::InvalidParameter {
                code,
                definition,
                parameter,
                message,
            } => {
                let message = format!("parameter '{}' {}", parameter, message);
                let mut diag = Diagnostic::error(*code, message).with_subject(definition.clone());
                if let Some(help) = code.info().help {
                    diag = diag.with_help(help);
                }
                diag
            }
            Self::Multiple(errors) => match errors.first() {
                Some(first) => first.to_diagnostic(),
                None => Diagnostic::error(ErrorCode::new(0), "Unknown error"),
            },
        }
    }

    /// Collapse a list of errors into a single error
    pub fn collect(mut errors: Vec<ReportError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}
