//! Integration tests for the dashboard metrics aggregator

use encounter_analytics::models::{DetailValue, EncounterDetails};
use encounter_analytics::{AgeUnit, ClinicalRecord, MetricsAggregator, Vocabulary};

use crate::utils::{init_logging, unit_record};

fn sample_records() -> Vec<ClinicalRecord> {
    let mut first = unit_record("r-1", (2024, 9, 2), "adult-health");
    first.sex = Some("f".to_string());
    first.smoker_status = Some("non-smoker".to_string());
    first.age = Some(30.0);
    first.age_unit = Some(AgeUnit::Years);
    first.vaccination_plan = Some(true);
    first.details = EncounterDetails {
        own_list: Some(true),
        contraceptive: Some(DetailValue::Text("implant".to_string())),
        problems: vec!["T90, K86".to_string()],
        referral: vec!["pediatrics".to_string(), "obgyn".to_string()],
        referral_motive: vec!["D12".to_string()],
        ..EncounterDetails::default()
    };

    let mut second = unit_record("r-2", (2024, 9, 3), "child-health");
    second.sex = Some("m".to_string());
    second.age = Some(18.0);
    second.age_unit = Some(AgeUnit::Months);
    second.vaccination_plan = Some(false);
    second.details = EncounterDetails {
        new_contraceptive: Some(DetailValue::Bool(true)),
        problems: vec!["T90".to_string()],
        ..EncounterDetails::default()
    };

    // No usable age: unit missing.
    let mut third = unit_record("r-3", (2024, 9, 4), "adult-health");
    third.sex = Some("f".to_string());
    third.age = Some(40.0);
    third.age_unit = None;

    vec![first, second, third]
}

/// A single pass fills every dimension at once
#[test]
fn test_aggregate_fills_all_dimensions() {
    init_logging();
    let vocabulary = Vocabulary::default();
    let metrics = MetricsAggregator::new(&vocabulary).aggregate(&sample_records());

    assert_eq!(metrics.total_count, 3);

    // Sex in first-seen order.
    let sexes: Vec<&str> = metrics.by_sex.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(sexes, ["f", "m"]);
    assert_eq!(metrics.by_sex[0].count, 2);

    // Types carry configured labels.
    let adult = metrics
        .by_type
        .iter()
        .find(|row| row.key == "adult-health")
        .unwrap();
    assert_eq!(adult.label, "Adult health");
    assert_eq!(adult.count, 2);

    // Only records with both age and unit contribute.
    let expected_age = (30.0 + 1.5) / 2.0;
    assert!((metrics.average_age - expected_age).abs() < 1e-9);
    let buckets: Vec<&str> = metrics
        .by_age_range
        .iter()
        .map(|row| row.key.as_str())
        .collect();
    assert_eq!(buckets, ["0-17", "18-44"]);

    // Explicit false is tallied, not dropped.
    let vaccination: Vec<(&str, u64)> = metrics
        .by_vaccination_plan
        .iter()
        .map(|row| (row.key.as_str(), row.count))
        .collect();
    assert_eq!(vaccination, [("yes", 1), ("no", 1)]);
}

/// Referral motives merge into every category the record declares
#[test]
fn test_referral_two_level_breakdown() {
    let vocabulary = Vocabulary::default();
    let metrics = MetricsAggregator::new(&vocabulary).aggregate(&sample_records());

    assert_eq!(metrics.by_referral.len(), 2);
    for referral in &metrics.by_referral {
        assert_eq!(referral.count, 1);
        assert_eq!(referral.motives.len(), 1);
        assert_eq!(referral.motives[0].key, "D12");
    }
}

/// Joined problem codes are split before tallying and ranked by count
#[test]
fn test_problem_codes_are_split_and_ranked() {
    let vocabulary = Vocabulary::default();
    let metrics = MetricsAggregator::new(&vocabulary).aggregate(&sample_records());

    assert_eq!(metrics.by_problems[0].key, "T90");
    assert_eq!(metrics.by_problems[0].count, 2);
    assert_eq!(metrics.by_problems[1].key, "K86");
    assert_eq!(metrics.by_problems[1].count, 1);
}

/// Two runs over the same input serialize byte-identically
#[test]
fn test_repeated_aggregation_is_reproducible() {
    let vocabulary = Vocabulary::default();
    let records = sample_records();
    let aggregator = MetricsAggregator::new(&vocabulary);

    let first = serde_json::to_string(&aggregator.aggregate(&records)).unwrap();
    let second = serde_json::to_string(&aggregator.aggregate(&records)).unwrap();
    assert_eq!(first, second);
}

/// The serialized payload keeps the camelCase field contract
#[test]
fn test_serialized_field_names() {
    let vocabulary = Vocabulary::default();
    let metrics = MetricsAggregator::new(&vocabulary).aggregate(&sample_records());
    let payload = serde_json::to_value(&metrics).unwrap();

    assert!(payload.get("totalCount").is_some());
    assert!(payload.get("averageAge").is_some());
    assert!(payload.get("bySex").is_some());
    assert!(payload.get("byAgeRange").is_some());
    assert!(payload.get("byNewContraceptive").is_some());
    assert!(payload.get("byReferral").is_some());
    assert!(payload.get("total_count").is_none());
}
