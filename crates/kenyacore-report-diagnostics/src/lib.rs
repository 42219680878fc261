//! Report assembly diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the report
//! model and builder crates, including error codes and diagnostic reporting.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for report assembly operations
pub type Result<T> = std::result::Result<T, ReportError>;
