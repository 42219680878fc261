//! Declarative report definition model
//!
//! This crate provides:
//! - Report parameters and parameter mappings (`Mapped<T>`)
//! - Per-subject data definitions and display converters
//! - Cohort, dataset and report definitions
//! - Report descriptors
//! - The metadata provider capability and a registry implementation
//!
//! Nothing in this crate evaluates a definition; it only describes one.

pub mod cohort;
pub mod converter;
pub mod data;
pub mod dataset;
pub mod descriptor;
pub mod mapped;
pub mod metadata;
pub mod parameter;
pub mod provider;
pub mod registry;
pub mod report;

pub use cohort::*;
pub use converter::*;
pub use data::*;
pub use dataset::*;
pub use descriptor::*;
pub use mapped::*;
pub use metadata::*;
pub use parameter::*;
pub use provider::*;
pub use registry::*;
pub use report::*;
