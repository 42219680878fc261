//! Report builder traits

use crate::columns::add_standard_columns;
use crate::config::AssemblerConfig;
use kenyacore_report_diagnostics::{ReportError, Result};
use kenyacore_report_model::{
    CohortDefinition, CohortReportDescriptor, DataSetDefinition, Descriptor, Mapped,
    MetadataProvider, Parameter, Parameterizable, ReportDefinition,
};

/// Lifecycle of turning a descriptor into a report definition
///
/// `build` calls `parameters` first, then `build_data_sets` with a report that
/// already carries those parameters.
pub trait ReportBuilder {
    type Descriptor: Descriptor;

    /// Ordered parameters the report declares
    fn parameters(&self, descriptor: &Self::Descriptor) -> Vec<Parameter>;

    fn build_data_sets(
        &self,
        descriptor: &Self::Descriptor,
        report: &ReportDefinition,
    ) -> Result<Vec<Mapped<DataSetDefinition>>>;

    /// Assemble the full report definition
    ///
    /// Datasets are keyed by their definition's name, which must be unique
    /// within the report.
    fn build(&self, descriptor: &Self::Descriptor) -> Result<ReportDefinition> {
        let mut report = ReportDefinition::new(descriptor.name());
        report.description = descriptor.description().map(str::to_string);
        report.add_parameters(&self.parameters(descriptor));

        for dsd in self.build_data_sets(descriptor, &report)? {
            let key = dsd.parameterizable.name().to_string();
            if report.data_set_definition(&key).is_some() {
                return Err(ReportError::configuration(format!(
                    "'{}' builds dataset '{}' more than once",
                    report.name, key
                )));
            }
            report.add_data_set_definition(key, dsd);
        }

        log::debug!(
            "Built report '{}' with {} parameters and {} datasets",
            report.name,
            report.parameters.len(),
            report.data_set_definitions.len()
        );
        Ok(report)
    }
}

/// Capabilities available to builder extension points during one assembly
#[derive(Clone, Copy)]
pub struct AssemblyContext<'a> {
    metadata: &'a dyn MetadataProvider,
    config: &'a AssemblerConfig,
}

impl<'a> AssemblyContext<'a> {
    pub fn new(metadata: &'a dyn MetadataProvider, config: &'a AssemblerConfig) -> Self {
        Self { metadata, config }
    }

    pub fn metadata(&self) -> &'a dyn MetadataProvider {
        self.metadata
    }

    pub fn config(&self) -> &'a AssemblerConfig {
        self.config
    }

    /// Append the standard patient list columns to `dsd`
    pub fn add_standard_columns(
        &self,
        descriptor: &CohortReportDescriptor,
        dsd: &mut DataSetDefinition,
    ) -> Result<()> {
        add_standard_columns(descriptor, dsd, self)
    }
}

/// Builder of a cohort report: one row per patient in a cohort
///
/// Implementors must supply the cohort; columns and parameters have defaults.
pub trait CohortReportBuilder: Send + Sync {
    /// Parameters of the report, in prompt order. None by default.
    fn parameters(&self, _descriptor: &CohortReportDescriptor) -> Vec<Parameter> {
        Vec::new()
    }

    /// Build and map the cohort the report's rows come from
    ///
    /// Every parameter the mapping references must be one of `dsd`'s
    /// parameters, which are the report's parameters.
    fn build_cohort(
        &self,
        descriptor: &CohortReportDescriptor,
        dsd: &DataSetDefinition,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Mapped<CohortDefinition>>;

    /// Append columns to `dsd`. Defaults to the standard columns.
    ///
    /// Overrides may call `ctx.add_standard_columns` first and append more, but
    /// must not remove or reorder columns already present.
    fn add_columns(
        &self,
        descriptor: &CohortReportDescriptor,
        dsd: &mut DataSetDefinition,
        ctx: &AssemblyContext<'_>,
    ) -> Result<()> {
        ctx.add_standard_columns(descriptor, dsd)
    }
}
