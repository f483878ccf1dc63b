//! End-to-end tests for filter compilation and evaluation

use chrono::NaiveDate;
use encounter_analytics::filter::{AgeRange, DateRange, FilterSpec};
use encounter_analytics::models::EncounterDetails;
use encounter_analytics::{AgeUnit, EngineError, Expr};

use crate::utils::unit_record;

/// Compile a dashboard selection and apply it over a mixed collection
#[test]
fn test_compiled_spec_narrows_a_collection() {
    let mut records = vec![
        unit_record("r-1", (2024, 9, 2), "adult-health"),
        unit_record("r-2", (2024, 9, 3), "child-health"),
        unit_record("r-3", (2024, 9, 4), "adult-health"),
    ];
    records[2].sex = Some("m".to_string());
    records[0].sex = Some("f".to_string());
    records[1].sex = Some("f".to_string());

    let spec = FilterSpec {
        sex: Some("f".to_string()),
        record_type: Some("adult-health".to_string()),
        ..FilterSpec::default()
    };
    let expr = spec.compile();
    let matched = expr.apply(&records).unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "r-1");
}

/// The age window must match records regardless of their stored unit
#[test]
fn test_age_window_spans_stored_units() {
    let mut in_years = unit_record("y", (2024, 9, 2), "adult-health");
    in_years.age = Some(30.0);
    in_years.age_unit = Some(AgeUnit::Years);

    let mut in_months = unit_record("m", (2024, 9, 2), "adult-health");
    in_months.age = Some(360.0);
    in_months.age_unit = Some(AgeUnit::Months);

    let mut in_weeks = unit_record("w", (2024, 9, 2), "adult-health");
    in_weeks.age = Some(938.0);
    in_weeks.age_unit = Some(AgeUnit::Weeks);

    let mut too_young = unit_record("d", (2024, 9, 2), "adult-health");
    too_young.age = Some(400.0);
    too_young.age_unit = Some(AgeUnit::Days);

    let records = vec![in_years, in_months, in_weeks, too_young];
    let spec = FilterSpec {
        age: Some(AgeRange {
            min: Some(18.0),
            max: None,
        }),
        ..FilterSpec::default()
    };
    let matched = spec.compile().apply(&records).unwrap();

    let ids: Vec<&str> = matched.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, ["y", "m", "w"]);
}

/// Date windows are inclusive on both ends
#[test]
fn test_date_window_is_inclusive() {
    let records = vec![
        unit_record("before", (2024, 8, 30), "adult-health"),
        unit_record("start", (2024, 9, 1), "adult-health"),
        unit_record("end", (2024, 9, 30), "adult-health"),
        unit_record("after", (2024, 10, 1), "adult-health"),
    ];
    let spec = FilterSpec {
        date: Some(DateRange {
            from: NaiveDate::from_ymd_opt(2024, 9, 1),
            to: NaiveDate::from_ymd_opt(2024, 9, 30),
        }),
        ..FilterSpec::default()
    };
    let matched = spec.compile().apply(&records).unwrap();

    let ids: Vec<&str> = matched.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, ["start", "end"]);
}

/// Prefix matching covers bare codes and code-with-description values
#[test]
fn test_problem_code_prefix_matches_both_shapes() {
    let mut bare = unit_record("bare", (2024, 9, 2), "adult-health");
    bare.details = EncounterDetails {
        problems: vec!["T90".to_string()],
        ..EncounterDetails::default()
    };
    let mut described = unit_record("described", (2024, 9, 3), "adult-health");
    described.details = EncounterDetails {
        problems: vec!["t90 - Diabetes mellitus".to_string()],
        ..EncounterDetails::default()
    };
    let mut other = unit_record("other", (2024, 9, 4), "adult-health");
    other.details = EncounterDetails {
        problems: vec!["K86".to_string()],
        ..EncounterDetails::default()
    };

    let records = vec![bare, described, other];
    let spec = FilterSpec {
        problem_code: Some("T90".to_string()),
        ..FilterSpec::default()
    };
    let matched = spec.compile().apply(&records).unwrap();

    let ids: Vec<&str> = matched.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, ["bare", "described"]);
}

/// An unknown field surfaces as an error instead of silently matching nothing
#[test]
fn test_unknown_field_reports_the_field_name() {
    let records = vec![unit_record("r-1", (2024, 9, 2), "adult-health")];
    let expr = Expr::IsNotNull("shoe_size".to_string());
    assert_eq!(
        expr.apply(&records),
        Err(EngineError::UnknownField("shoe_size".to_string()))
    );
}

/// Compiled expressions report every field a query layer must provide
#[test]
fn test_compiled_spec_reports_required_fields() {
    let spec = FilterSpec {
        location: Some("unit".to_string()),
        age: Some(AgeRange {
            min: Some(18.0),
            max: Some(64.0),
        }),
        exclude_type: Some("acute".to_string()),
        ..FilterSpec::default()
    };
    let fields = spec.compile().required_fields();

    assert!(fields.contains("location"));
    assert!(fields.contains("age"));
    assert!(fields.contains("age_unit"));
    assert!(fields.contains("record_type"));
}
