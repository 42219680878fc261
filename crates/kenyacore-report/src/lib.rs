//! Report definition assembly for cohort-style patient reports
//!
//! Given a report descriptor this crate assembles a declarative report
//! definition:
//! - the report's ordered parameters
//! - one row-per-patient dataset filtered by a cohort
//! - standard per-patient columns (id, name, age, sex, phone and an optional identifier)
//!
//! The definition is only assembled here; evaluating it against patient data is
//! the job of a separate engine.
//!
//! # Example
//!
//! ```ignore
//! use kenyacore_report::{MetadataRegistry, ReportAssembler, ReportBuilder};
//!
//! let registry = MetadataRegistry::from_file("metadata.json")?;
//! let assembler = ReportAssembler::new(MyCohortReport, Arc::new(registry));
//! let report = assembler.build(&descriptor)?;
//! println!("{}", report.to_json()?);
//! ```

// Re-export all public APIs from internal crates
pub use kenyacore_report_builder as builder;
pub use kenyacore_report_diagnostics as diagnostics;
pub use kenyacore_report_model as model;

// Convenience re-exports
pub use kenyacore_report_builder::{
    AssemblerConfig, AssemblyContext, CohortReportBuilder, ReportAssembler, ReportBuilder,
    UnresolvedReferencePolicy,
};
pub use kenyacore_report_diagnostics::{Diagnostic, ReportError, Result};
pub use kenyacore_report_model::{
    CohortDefinition, CohortReportDescriptor, DataSetDefinition, Mapped, MetadataProvider,
    MetadataRegistry, Parameter, ReportDefinition,
};
