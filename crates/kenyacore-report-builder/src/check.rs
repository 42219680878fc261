//! Precondition checks on assembled datasets
//!
//! Assembly itself never validates bindings; these checks are opt-in (see
//! `AssemblerConfig::check_parameters`) and otherwise available to callers
//! that want to surface problems before evaluation.

use kenyacore_report_diagnostics::{Diagnostic, KRP0100, ReportError, Result};
use kenyacore_report_model::{DataSetDefinition, Mapped, MappedValue, Parameter, Parameterizable};

/// Parameters a mapped definition needs from its parent that the parent lacks
///
/// Counts names referenced by bindings plus declared parameters that are
/// neither bound nor defaulted. Nothing binds by name implicitly, so an
/// unbound parameter is missing even when the parent declares the same name.
fn missing_parameters<T: Parameterizable>(mapped: &Mapped<T>, declared: &[&str]) -> Vec<String> {
    let mut missing: Vec<String> = mapped
        .referenced_parameters()
        .into_iter()
        .filter(|name| !declared.contains(&name.as_str()))
        .collect();

    for parameter in mapped.unbound_parameters() {
        if parameter.default_value.is_none() && !missing.contains(&parameter.name) {
            missing.push(parameter.name.clone());
        }
    }
    missing
}

/// Duplicate names and defaults that do not fit their parameter's type
fn declaration_errors(definition: &str, parameters: &[Parameter]) -> Vec<ReportError> {
    let mut errors = Vec::new();

    for (i, parameter) in parameters.iter().enumerate() {
        if parameters[..i].iter().any(|p| p.name == parameter.name) {
            errors.push(ReportError::duplicate_parameter(definition, parameter.name.clone()));
        }
        let incompatible = parameter
            .default_value
            .as_ref()
            .filter(|value| !value.is_compatible_with(parameter.kind));
        if let Some(value) = incompatible {
            errors.push(ReportError::incompatible_value(
                definition,
                parameter.name.clone(),
                format!("has a default of {} for type {}", value, parameter.kind),
            ));
        }
    }
    errors
}

/// Literal bindings whose value does not fit the bound parameter's type
fn literal_errors<T: Parameterizable>(mapped: &Mapped<T>, definition: &str) -> Vec<ReportError> {
    mapped
        .parameter_mappings
        .iter()
        .filter_map(|(name, value)| match value {
            MappedValue::Literal(literal) => {
                let parameter = mapped.parameterizable.parameter(name)?;
                (!literal.is_compatible_with(parameter.kind)).then(|| {
                    ReportError::incompatible_value(
                        definition,
                        name.clone(),
                        format!("is bound to {} for type {}", literal, parameter.kind),
                    )
                })
            }
            MappedValue::Expression(_) => None,
        })
        .collect()
}

fn nested_errors<T: Parameterizable>(
    mapped: &Mapped<T>,
    definition: &str,
    declared: &[&str],
) -> Vec<ReportError> {
    let mut errors = declaration_errors(definition, mapped.parameterizable.parameters());
    errors.extend(literal_errors(mapped, definition));

    let missing = missing_parameters(mapped, declared);
    if !missing.is_empty() {
        errors.push(ReportError::parameter_mismatch(definition, missing));
    }
    errors
}

fn parameter_errors(dsd: &DataSetDefinition) -> Vec<ReportError> {
    let declared: Vec<&str> = dsd.parameters.iter().map(|p| p.name.as_str()).collect();
    let mut errors = declaration_errors(&dsd.name, &dsd.parameters);

    for cohort in &dsd.row_filters {
        errors.extend(nested_errors(cohort, cohort.parameterizable.name(), &declared));
    }
    for column in &dsd.columns {
        errors.extend(nested_errors(&column.definition, &column.label, &declared));
    }
    errors
}

/// Fail if the dataset's parameters or the bindings of its row filters and
/// columns cannot be satisfied at evaluation time
pub fn check_parameters(dsd: &DataSetDefinition) -> Result<()> {
    match ReportError::collect(parameter_errors(dsd)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// All problems with a dataset that would only show up at evaluation time
///
/// Parameter problems are errors; unresolved metadata references are warnings.
pub fn diagnose(dsd: &DataSetDefinition) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> =
        parameter_errors(dsd).iter().map(ReportError::to_diagnostic).collect();

    for column in &dsd.columns {
        if !column.definition.parameterizable.is_resolved() {
            diagnostics.push(
                Diagnostic::warning(KRP0100, "column lookup references unresolved metadata")
                    .with_subject(column.label.clone()),
            );
        }
    }
    diagnostics
}
