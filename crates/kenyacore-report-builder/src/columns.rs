//! Standard patient list columns

use crate::builder::AssemblyContext;
use crate::config::UnresolvedReferencePolicy;
use kenyacore_report_diagnostics::{ReportError, Result};
use kenyacore_report_model::{
    CohortReportDescriptor, DataConverter, DataDefinition, DataSetDefinition,
};

/// Uuid of the telephone contact person attribute type
pub const PHONE_NUMBER_ATTRIBUTE_TYPE: &str = "b2c38640-2603-4629-aebd-3b54f33f1e3a";

/// Append `id`, `Name`, `Age`, `Sex` and `phone`, then the display identifier
/// column when the descriptor configures one
///
/// The identifier column is labelled with the identifier type's name.
pub fn add_standard_columns(
    descriptor: &CohortReportDescriptor,
    dsd: &mut DataSetDefinition,
    ctx: &AssemblyContext<'_>,
) -> Result<()> {
    let name = DataDefinition::converted(
        "name",
        DataDefinition::PreferredName,
        vec![DataConverter::formatter("{givenName}")],
    );

    let phone_type = ctx.metadata().person_attribute_type(PHONE_NUMBER_ATTRIBUTE_TYPE);
    if phone_type.is_none() {
        match ctx.config().unresolved_references {
            UnresolvedReferencePolicy::Warn => log::warn!(
                "Person attribute type {} not found, phone column of '{}' will be empty",
                PHONE_NUMBER_ATTRIBUTE_TYPE,
                dsd.name
            ),
            UnresolvedReferencePolicy::Fail => {
                return Err(ReportError::unresolved_attribute_type(PHONE_NUMBER_ATTRIBUTE_TYPE)
                    .with_context("phone"));
            }
        }
    }

    dsd.add_column("id", DataDefinition::PatientId, Vec::new());
    dsd.add_column("Name", name, Vec::new());
    dsd.add_column("Age", DataDefinition::Age, Vec::new());
    dsd.add_column("Sex", DataDefinition::Gender, Vec::new());
    dsd.add_column(
        "phone",
        DataDefinition::person_attribute("phone", phone_type),
        vec![DataConverter::property("PersonAttribute", "value")],
    );

    if let Some(id_type) = descriptor.display_identifier() {
        let label = id_type.name.clone();
        let identifier = DataDefinition::converted(
            "identifier",
            DataDefinition::patient_identifier(id_type.name.clone(), id_type.clone()),
            vec![DataConverter::formatter("{identifier}")],
        );
        dsd.add_column(label, identifier, Vec::new());
    }

    Ok(())
}
