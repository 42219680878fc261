//! Tests for cohort report assembly
//!
//! Covers:
//! - Standard column set, with and without a display identifier
//! - Parameter propagation from report to dataset
//! - Straight-through dataset mapping
//! - Overridden column and parameter extension points
//! - Strict configuration

use kenyacore_report_builder::{
    AssemblerConfig, AssemblyContext, CohortReportBuilder, PHONE_NUMBER_ATTRIBUTE_TYPE,
    ReportAssembler, ReportBuilder,
};
use kenyacore_report_diagnostics::{KRP0100, KRP0200, ReportError, Result};
use kenyacore_report_model::{
    CohortDefinition, CohortKind, CohortReportDescriptor, DataConverter, DataDefinition,
    DataSetDefinition, Mapped, MappedValue, MetadataProvider, MetadataRegistry, Parameter,
    ParameterType, PatientIdentifierType, PersonAttributeType, ReportDefinition,
};
use mockall::mock;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;

mock! {
    pub Metadata {}

    impl MetadataProvider for Metadata {
        fn person_attribute_type(&self, uuid: &str) -> Option<PersonAttributeType>;
        fn patient_identifier_type(&self, uuid: &str) -> Option<PatientIdentifierType>;
    }
}

fn phone_type() -> PersonAttributeType {
    PersonAttributeType::new(PHONE_NUMBER_ATTRIBUTE_TYPE, "Telephone contact")
}

fn registry() -> Arc<dyn MetadataProvider> {
    let registry = MetadataRegistry::new();
    registry.register_attribute_type(phone_type());
    Arc::new(registry)
}

fn report_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("startDate", "Start Date", ParameterType::Date),
        Parameter::new("endDate", "End Date", ParameterType::Date),
        Parameter::new("location", "Facility", ParameterType::Location),
    ]
}

/// Patients active between the report dates, all report parameters passed through
struct ActivePatients;

impl CohortReportBuilder for ActivePatients {
    fn parameters(&self, _descriptor: &CohortReportDescriptor) -> Vec<Parameter> {
        report_parameters()
    }

    fn build_cohort(
        &self,
        _descriptor: &CohortReportDescriptor,
        dsd: &DataSetDefinition,
        _ctx: &AssemblyContext<'_>,
    ) -> Result<Mapped<CohortDefinition>> {
        let mut cohort = CohortDefinition::sql(
            "Active patients",
            "select patient_id from visit \
             where date between :startDate and :endDate and location_id = :location",
        );
        cohort.parameters = dsd.parameters.clone();
        Ok(Mapped::straight_through(cohort))
    }
}

/// Relies on every default
struct AllPatients;

impl CohortReportBuilder for AllPatients {
    fn build_cohort(
        &self,
        _descriptor: &CohortReportDescriptor,
        _dsd: &DataSetDefinition,
        _ctx: &AssemblyContext<'_>,
    ) -> Result<Mapped<CohortDefinition>> {
        Ok(Mapped::unmapped(CohortDefinition::all_patients()))
    }
}

/// Standard columns plus one appended column
struct MissedAppointments;

impl CohortReportBuilder for MissedAppointments {
    fn parameters(&self, _descriptor: &CohortReportDescriptor) -> Vec<Parameter> {
        report_parameters()
    }

    fn build_cohort(
        &self,
        descriptor: &CohortReportDescriptor,
        dsd: &DataSetDefinition,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Mapped<CohortDefinition>> {
        ActivePatients.build_cohort(descriptor, dsd, ctx)
    }

    fn add_columns(
        &self,
        descriptor: &CohortReportDescriptor,
        dsd: &mut DataSetDefinition,
        ctx: &AssemblyContext<'_>,
    ) -> Result<()> {
        ctx.add_standard_columns(descriptor, dsd)?;
        dsd.add_column_with_mappings(
            "Next appointment",
            Mapped::unmapped(DataDefinition::person_attribute("nextAppointment", None))
                .with_mapping("onDate", MappedValue::parameter("endDate")),
            Vec::new(),
        );
        Ok(())
    }
}

/// Cohort mapped to a parameter the report never declares
struct MislabelledCohort;

impl CohortReportBuilder for MislabelledCohort {
    fn build_cohort(
        &self,
        _descriptor: &CohortReportDescriptor,
        _dsd: &DataSetDefinition,
        _ctx: &AssemblyContext<'_>,
    ) -> Result<Mapped<CohortDefinition>> {
        let query = "select patient_id from art where start <= :onDate";
        let cohort = CohortDefinition::sql("On ART", query)
            .with_parameter(Parameter::new("onDate", "On Date", ParameterType::Date));
        Mapped::map(cohort, "onDate=${reportDate}")
    }
}

fn descriptor(name: &str) -> CohortReportDescriptor {
    let id = format!("kenyaemr.report.{}", name.to_lowercase().replace(' ', "_"));
    CohortReportDescriptor::new(id, name)
}

fn hiv_descriptor(name: &str) -> CohortReportDescriptor {
    descriptor(name).with_display_identifier(PatientIdentifierType::new(
        "d8ee3b8c-a8fc-4d6b-af6a-9423be5f8906",
        "HIV ID",
    ))
}

fn only_dataset(report: &ReportDefinition) -> &Mapped<DataSetDefinition> {
    assert_eq!(report.data_set_definitions.len(), 1);
    report.data_set_definitions.values().next().unwrap()
}

// === Standard Columns ===

#[test]
fn test_standard_columns_without_identifier() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let report = assembler.build(&descriptor("Active patients")).unwrap();
    let dsd = &only_dataset(&report).parameterizable;

    assert_eq!(dsd.column_labels(), vec!["id", "Name", "Age", "Sex", "phone"]);

    assert_eq!(dsd.columns[0].definition.parameterizable, DataDefinition::PatientId);
    assert_eq!(
        dsd.columns[1].definition.parameterizable,
        DataDefinition::converted(
            "name",
            DataDefinition::PreferredName,
            vec![DataConverter::formatter("{givenName}")],
        )
    );
    assert_eq!(dsd.columns[2].definition.parameterizable, DataDefinition::Age);
    assert_eq!(dsd.columns[3].definition.parameterizable, DataDefinition::Gender);
    assert_eq!(
        dsd.columns[4].definition.parameterizable,
        DataDefinition::person_attribute("phone", Some(phone_type()))
    );
    assert_eq!(
        dsd.columns[4].converters,
        vec![DataConverter::property("PersonAttribute", "value")]
    );
}

#[test]
fn test_display_identifier_adds_sixth_column() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let report = assembler.build(&hiv_descriptor("Active patients")).unwrap();
    let dsd = &only_dataset(&report).parameterizable;

    assert_eq!(dsd.column_labels(), vec!["id", "Name", "Age", "Sex", "phone", "HIV ID"]);

    let identifier = &dsd.columns[5].definition.parameterizable;
    assert_eq!(
        identifier,
        &DataDefinition::converted(
            "identifier",
            DataDefinition::patient_identifier(
                "HIV ID",
                PatientIdentifierType::new("d8ee3b8c-a8fc-4d6b-af6a-9423be5f8906", "HIV ID"),
            ),
            vec![DataConverter::formatter("{identifier}")],
        )
    );
}

#[rstest]
#[case("Unique Patient Number")]
#[case("TB Number")]
#[case("National ID")]
fn test_identifier_label_comes_from_type(#[case] type_name: &str) {
    let assembler = ReportAssembler::new(AllPatients, registry());
    let descriptor = descriptor("Cohort")
        .with_display_identifier(PatientIdentifierType::new("some-uuid", type_name));

    let report = assembler.build(&descriptor).unwrap();
    let dsd = &only_dataset(&report).parameterizable;

    assert_eq!(dsd.columns.len(), 6);
    assert_eq!(dsd.columns[5].label, type_name);
}

#[test]
fn test_standard_columns_independent_of_report_name() {
    let registry = registry();
    let config = AssemblerConfig::default();
    let ctx = AssemblyContext::new(registry.as_ref(), &config);

    let mut first = DataSetDefinition::new("Active patients DSD");
    let mut second = DataSetDefinition::new("Defaulters DSD");
    ctx.add_standard_columns(&hiv_descriptor("Active patients"), &mut first).unwrap();
    ctx.add_standard_columns(&hiv_descriptor("Defaulters"), &mut second).unwrap();

    assert_eq!(first.columns, second.columns);
    assert_ne!(first.name, second.name);
}

#[test]
fn test_phone_type_looked_up_once_per_assembly() {
    let mut metadata = MockMetadata::new();
    metadata
        .expect_person_attribute_type()
        .withf(|uuid| uuid == PHONE_NUMBER_ATTRIBUTE_TYPE)
        .times(1)
        .returning(|_| Some(phone_type()));
    metadata.expect_patient_identifier_type().never();

    let assembler = ReportAssembler::new(AllPatients, Arc::new(metadata));
    let report = assembler.build(&hiv_descriptor("Cohort")).unwrap();

    assert_eq!(only_dataset(&report).parameterizable.columns.len(), 6);
}

#[test]
fn test_unresolved_phone_type_emits_empty_lookup() {
    let mut metadata = MockMetadata::new();
    metadata.expect_person_attribute_type().returning(|_| None);

    let assembler = ReportAssembler::new(AllPatients, Arc::new(metadata));
    let report = assembler.build(&descriptor("Cohort")).unwrap();
    let phone = only_dataset(&report).parameterizable.column("phone").unwrap();

    assert_eq!(phone.definition.parameterizable, DataDefinition::person_attribute("phone", None));
    assert!(!phone.definition.parameterizable.is_resolved());
}

// === Parameters ===

#[test]
fn test_default_parameters_are_empty() {
    let assembler = ReportAssembler::new(AllPatients, registry());

    assert!(assembler.parameters(&descriptor("One")).is_empty());
    assert!(assembler.parameters(&hiv_descriptor("Two")).is_empty());

    let report = assembler.build(&descriptor("One")).unwrap();
    assert!(report.parameters.is_empty());
    assert!(only_dataset(&report).parameter_mappings.is_empty());
}

#[test]
fn test_dataset_parameters_match_report() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let report = assembler.build(&descriptor("Active patients")).unwrap();

    assert_eq!(report.parameters, report_parameters());
    assert_eq!(only_dataset(&report).parameterizable.parameters, report.parameters);
}

#[test]
fn test_build_data_sets_copies_given_report_parameters() {
    let assembler = ReportAssembler::new(AllPatients, registry());
    let mut report = ReportDefinition::new("Custom");
    report.add_parameters(&report_parameters());

    let data_sets = assembler.build_data_sets(&descriptor("Custom"), &report).unwrap();

    assert_eq!(data_sets.len(), 1);
    assert_eq!(data_sets[0].parameterizable.name, "Custom DSD");
    assert_eq!(data_sets[0].parameterizable.parameters, report.parameters);
}

#[test]
fn test_dataset_mapped_straight_through() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let report = assembler.build(&descriptor("Active patients")).unwrap();
    let mapped = only_dataset(&report);

    let keys: Vec<_> = mapped.parameter_mappings.keys().cloned().collect();
    assert_eq!(keys, vec!["startDate", "endDate", "location"]);
    for parameter in &mapped.parameterizable.parameters {
        assert_eq!(
            mapped.mapping(&parameter.name),
            Some(&MappedValue::Expression(format!("${{{}}}", parameter.name)))
        );
        assert_eq!(
            mapped.mapping(&parameter.name).unwrap().referenced_parameters(),
            vec![parameter.name.as_str()]
        );
    }
}

// === Report Structure ===

#[test]
fn test_report_keys_dataset_by_name() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let descriptor = descriptor("Active patients");
    let report = assembler.build(&descriptor).unwrap();

    assert_eq!(report.name, "Active patients");
    let keys: Vec<_> = report.data_set_definitions.keys().cloned().collect();
    assert_eq!(keys, vec!["Active patients DSD"]);
}

#[test]
fn test_cohort_becomes_row_filter() {
    let assembler = ReportAssembler::new(ActivePatients, registry());
    let report = assembler.build(&descriptor("Active patients")).unwrap();
    let dsd = &only_dataset(&report).parameterizable;

    assert_eq!(dsd.row_filters.len(), 1);
    let cohort = &dsd.row_filters[0];
    assert_eq!(cohort.parameterizable.name, "Active patients");
    assert!(matches!(cohort.parameterizable.kind, CohortKind::Sql { .. }));
    assert_eq!(cohort.referenced_parameters(), vec!["startDate", "endDate", "location"]);
}

#[rstest]
#[case::without_identifier(descriptor("Missed appointments"), 5)]
#[case::with_identifier(hiv_descriptor("Missed appointments"), 6)]
fn test_overridden_columns_append_after_standard_set(
    #[case] report: CohortReportDescriptor,
    #[case] standard_count: usize,
) {
    let standard = ReportAssembler::new(ActivePatients, registry()).build(&report).unwrap();
    let extended = ReportAssembler::new(MissedAppointments, registry()).build(&report).unwrap();

    let standard = &only_dataset(&standard).parameterizable;
    let extended = &only_dataset(&extended).parameterizable;

    assert_eq!(standard.columns.len(), standard_count);
    assert_eq!(extended.columns.len(), standard_count + 1);
    assert_eq!(extended.columns[..standard_count], standard.columns[..]);
    assert_eq!(extended.columns[standard_count].label, "Next appointment");
}

// === Configuration ===

#[test]
fn test_strict_config_rejects_unresolved_phone_type() {
    let assembler = ReportAssembler::new(AllPatients, Arc::new(MetadataRegistry::new()))
        .with_config(AssemblerConfig::strict());

    let err = assembler.build(&descriptor("Cohort")).unwrap_err();
    assert_eq!(err.code(), KRP0100);
}

#[test]
fn test_parameter_mismatch_deferred_by_default() {
    let assembler = ReportAssembler::new(MislabelledCohort, registry());
    let report = assembler.build(&descriptor("On ART")).unwrap();

    assert_eq!(
        only_dataset(&report).parameterizable.row_filters[0].referenced_parameters(),
        vec!["reportDate"]
    );
}

#[test]
fn test_parameter_mismatch_checked_when_enabled() {
    let config = AssemblerConfig {
        check_parameters: true,
        ..AssemblerConfig::default()
    };
    let assembler = ReportAssembler::new(MislabelledCohort, registry()).with_config(config);

    match assembler.build(&descriptor("On ART")).unwrap_err() {
        ReportError::ParameterMismatch { code, definition, missing } => {
            assert_eq!(code, KRP0200);
            assert_eq!(definition, "On ART");
            assert_eq!(missing, vec!["reportDate".to_string()]);
        }
        other => panic!("Expected parameter mismatch, got {:?}", other),
    }
}

#[test]
fn test_extended_columns_pass_parameter_check() {
    let config = AssemblerConfig {
        check_parameters: true,
        ..AssemblerConfig::default()
    };
    let assembler = ReportAssembler::new(MissedAppointments, registry()).with_config(config);

    assert!(assembler.build(&descriptor("Missed appointments")).is_ok());
}

// === Concurrency ===

#[test]
fn test_concurrent_assemblies_are_independent() {
    let assembler = ReportAssembler::new(ActivePatients, registry());

    let reports: Vec<ReportDefinition> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let assembler = &assembler;
                scope.spawn(move || assembler.build(&descriptor(&format!("Report {}", i))).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, report) in reports.iter().enumerate() {
        let dsd = &only_dataset(report).parameterizable;
        assert_eq!(dsd.name, format!("Report {} DSD", i));
        assert_eq!(dsd.columns.len(), 5);
    }
}
