//! Cohort report assembler

use crate::builder::{AssemblyContext, CohortReportBuilder, ReportBuilder};
use crate::check::check_parameters;
use crate::config::AssemblerConfig;
use kenyacore_report_diagnostics::Result;
use kenyacore_report_model::{
    CohortReportDescriptor, DataSetDefinition, Descriptor, Mapped, MetadataProvider, Parameter,
    ReportDefinition,
};
use std::sync::Arc;

/// Runs a [`CohortReportBuilder`] through the report lifecycle
///
/// Every call to [`ReportBuilder::build_data_sets`] creates a fresh dataset,
/// so one assembler can serve concurrent assemblies.
pub struct ReportAssembler<B> {
    builder: B,
    metadata: Arc<dyn MetadataProvider>,
    config: AssemblerConfig,
}

impl<B: CohortReportBuilder> ReportAssembler<B> {
    pub fn new(builder: B, metadata: Arc<dyn MetadataProvider>) -> Self {
        Self {
            builder,
            metadata,
            config: AssemblerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AssemblerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    fn context(&self) -> AssemblyContext<'_> {
        AssemblyContext::new(self.metadata.as_ref(), &self.config)
    }
}

impl<B: CohortReportBuilder> ReportBuilder for ReportAssembler<B> {
    type Descriptor = CohortReportDescriptor;

    fn parameters(&self, descriptor: &CohortReportDescriptor) -> Vec<Parameter> {
        self.builder.parameters(descriptor)
    }

    fn build_data_sets(
        &self,
        descriptor: &CohortReportDescriptor,
        report: &ReportDefinition,
    ) -> Result<Vec<Mapped<DataSetDefinition>>> {
        let ctx = self.context();

        let mut dsd = DataSetDefinition::new(format!("{} DSD", descriptor.name()));
        // Same parameters as the report
        dsd.add_parameters(&report.parameters);

        let cohort = self.builder.build_cohort(descriptor, &dsd, &ctx)?;
        log::debug!("Built cohort '{}' for '{}'", cohort.parameterizable.name, dsd.name);
        dsd.add_row_filter(cohort);

        self.builder.add_columns(descriptor, &mut dsd, &ctx)?;
        log::debug!("Added {} columns to '{}'", dsd.columns.len(), dsd.name);

        if self.config.check_parameters {
            check_parameters(&dsd)?;
        }

        // Map all parameters straight through
        Ok(vec![Mapped::straight_through(dsd)])
    }
}
