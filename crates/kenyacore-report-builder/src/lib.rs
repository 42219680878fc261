//! Cohort report assembly
//!
//! Turns a [`CohortReportDescriptor`](kenyacore_report_model::CohortReportDescriptor)
//! into a [`ReportDefinition`](kenyacore_report_model::ReportDefinition): the
//! report's parameters plus one row-per-patient dataset whose rows come from a
//! cohort and whose columns are per-patient lookups.
//!
//! # Example
//!
//! ```ignore
//! use kenyacore_report_builder::{
//!     AssemblyContext, CohortReportBuilder, ReportAssembler, ReportBuilder,
//! };
//!
//! struct ActivePatients;
//!
//! impl CohortReportBuilder for ActivePatients {
//!     fn build_cohort(
//!         &self,
//!         _: &CohortReportDescriptor,
//!         _: &DataSetDefinition,
//!         _: &AssemblyContext<'_>,
//!     ) -> Result<Mapped<CohortDefinition>> {
//!         Ok(Mapped::straight_through(CohortDefinition::all_patients()))
//!     }
//! }
//!
//! let assembler = ReportAssembler::new(ActivePatients, Arc::new(registry));
//! let report = assembler.build(&descriptor)?;
//! ```
//!
//! # Extension points
//!
//! - `CohortReportBuilder::build_cohort` is required and supplies the row filter
//! - `CohortReportBuilder::add_columns` defaults to the standard columns
//!   (`id`, `Name`, `Age`, `Sex`, `phone` and the display identifier when configured)
//! - `CohortReportBuilder::parameters` defaults to no parameters

pub mod assembler;
pub mod builder;
pub mod check;
pub mod columns;
pub mod config;

pub use assembler::ReportAssembler;
pub use builder::{AssemblyContext, CohortReportBuilder, ReportBuilder};
pub use check::{check_parameters, diagnose};
pub use columns::{PHONE_NUMBER_ATTRIBUTE_TYPE, add_standard_columns};
pub use config::{AssemblerConfig, UnresolvedReferencePolicy};
