//! Integration tests for the per-program-year report pipelines

use encounter_analytics::algorithm::report::generate_report_for_year;
use encounter_analytics::{EngineError, ProgramYear, ReportConfig, Vocabulary};
use encounter_analytics::{generate_report, ClinicalRecord};

use crate::utils::{complementary_record, init_logging, unit_record, urgent_record};

fn defaults() -> (ReportConfig, Vocabulary) {
    (ReportConfig::default(), Vocabulary::default())
}

fn year_one_records() -> Vec<ClinicalRecord> {
    let mut records = vec![
        // Week of Monday 2024-09-02: four records over three days.
        unit_record("a-1", (2024, 9, 2), "adult-health"),
        unit_record("a-2", (2024, 9, 3), "child-health"),
        unit_record("a-3", (2024, 9, 4), "adult-health"),
        unit_record("a-4", (2024, 9, 4), "adult-health"),
        // Week of 2024-09-09: only two distinct days, below the threshold.
        unit_record("b-1", (2024, 9, 9), "adult-health"),
        unit_record("b-2", (2024, 9, 10), "adult-health"),
        // Week of 2024-05-06: outside the month window.
        unit_record("c-1", (2024, 5, 6), "adult-health"),
        unit_record("c-2", (2024, 5, 7), "adult-health"),
        unit_record("c-3", (2024, 5, 8), "adult-health"),
    ];
    // Urgent care: three general-surgery days with counts [3, 1, 2].
    records.extend([
        urgent_record("u-1", (2024, 10, 7), "general-surgery"),
        urgent_record("u-2", (2024, 10, 7), "general-surgery"),
        urgent_record("u-3", (2024, 10, 7), "general-surgery"),
        urgent_record("u-4", (2024, 10, 8), "general-surgery"),
        urgent_record("u-5", (2024, 10, 9), "general-surgery"),
        urgent_record("u-6", (2024, 10, 9), "general-surgery"),
    ]);
    records
}

/// Year 1 samples second-semester weeks and reports urgent care separately
#[test]
fn test_year_one_pipeline() {
    init_logging();
    let (config, vocabulary) = defaults();
    let report = generate_report(ProgramYear::One, &year_one_records(), &config, &vocabulary);

    assert_eq!(report.program_year, 1);

    // Only the September week passes the month window and day threshold.
    let weeks = report.week_samples.as_ref().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].record_count, 4);
    assert_eq!(weeks[0].unique_day_count, 3);

    // Summary and breakdown cover exactly the sampled weeks' records.
    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.total_consultations, 4);
    let breakdown = report.unit_breakdown.as_ref().unwrap();
    assert_eq!(breakdown.total_count, 4);

    // Two busiest urgent-care days only: 3 + 2.
    let urgency = report.urgency.as_ref().unwrap();
    assert_eq!(urgency.len(), 1);
    assert_eq!(urgency[0].label, "General surgery");
    assert_eq!(urgency[0].total_count, 5);

    // Mid-years sections are not applicable.
    assert!(report.year_two_weeks.is_none());
    assert!(report.top_problems.is_none());
    assert!(report.complementary_samples.is_none());
}

fn mid_years_records() -> Vec<ClinicalRecord> {
    let mut records = Vec::new();

    // Program-year 2: week of Monday 2024-03-11, three days.
    for (id, day, problems) in [
        ("y2-1", 11, "T90"),
        ("y2-2", 12, "T90, K86"),
        ("y2-3", 13, "K86"),
    ] {
        let mut record = unit_record(id, (2024, 3, day), "adult-health");
        record.program_year = Some(2);
        record.details.problems = vec![problems.to_string()];
        records.push(record);
    }

    // Program-year 3: week of Monday 2024-04-08, three days.
    for (id, day, problem) in [("y3-1", 8, "T90"), ("y3-2", 9, "P76"), ("y3-3", 10, "T90")] {
        let mut record = unit_record(id, (2024, 4, day), "child-health");
        record.program_year = Some(3);
        record.details.problems = vec![problem.to_string()];
        records.push(record);
    }

    records.extend([
        urgent_record("u-1", (2024, 5, 6), "pediatrics"),
        urgent_record("u-2", (2024, 5, 6), "pediatrics"),
        urgent_record("u-3", (2024, 5, 7), "psychiatry"),
    ]);
    records.extend([
        complementary_record("c-1", (2024, 6, 3), "dermatology"),
        complementary_record("c-2", (2024, 6, 4), "dermatology"),
    ]);
    records
}

/// Years 2-3 split by program year and rank problems over the sampled union
#[test]
fn test_mid_years_pipeline() {
    let (config, vocabulary) = defaults();
    let report = generate_report(ProgramYear::Two, &mid_years_records(), &config, &vocabulary);

    let year_two = report.year_two_weeks.as_ref().unwrap();
    assert_eq!(year_two.len(), 1);
    assert_eq!(year_two[0].record_count, 3);
    let year_three = report.year_three_weeks.as_ref().unwrap();
    assert_eq!(year_three.len(), 1);
    assert_eq!(year_three[0].record_count, 3);

    // T90 appears four times across both sampled weeks, K86 twice.
    let top = report.top_problems.as_ref().unwrap();
    assert_eq!(top[0].key, "T90");
    assert_eq!(top[0].count, 4);
    assert_eq!(top[1].key, "K86");
    assert_eq!(top[1].count, 2);

    // Only groups with matching days appear.
    let urgency = report.urgency.as_ref().unwrap();
    let labels: Vec<&str> = urgency.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Pediatrics", "Psychiatry"]);

    // Every configured complementary group is reported, matched by rotation.
    let complementary = report.complementary_samples.as_ref().unwrap();
    assert_eq!(complementary.len(), 3);
    let dermatology = complementary
        .iter()
        .find(|sample| sample.label == "Dermatology")
        .unwrap();
    assert_eq!(dermatology.weeks.len(), 1);
    assert_eq!(dermatology.weeks[0].record_count, 2);

    // Year-1 sections are not applicable.
    assert!(report.summary.is_none());
    assert!(report.week_samples.is_none());
    assert!(report.unit_breakdown.is_none());
}

/// Year 4 counts the whole year at full autonomy, with no sampling
#[test]
fn test_year_four_pipeline() {
    let (config, vocabulary) = defaults();
    let mut full = unit_record("f-1", (2024, 2, 5), "adult-health");
    full.autonomy = Some("full".to_string());
    let mut also_full = unit_record("f-2", (2024, 2, 6), "child-health");
    also_full.autonomy = Some("full".to_string());
    // Valid type but partial autonomy: excluded.
    let partial = unit_record("p-1", (2024, 2, 7), "adult-health");
    let records = vec![full, also_full, partial];

    let report = generate_report(ProgramYear::Four, &records, &config, &vocabulary);

    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.total_consultations, 2);
    assert!(report.week_samples.is_none());
    assert!(report.urgency.is_none());
    assert!(report.complementary_samples.is_none());
}

/// An unknown program year is an explicit failure, not an empty payload
#[test]
fn test_dispatcher_rejects_unknown_years() {
    let (config, vocabulary) = defaults();
    let result = generate_report_for_year(5, &[], &config, &vocabulary);
    assert_eq!(result.unwrap_err(), EngineError::UnknownReport(5));

    let report = generate_report_for_year(4, &[], &config, &vocabulary).unwrap();
    assert_eq!(report.program_year, 4);
}

/// Absent sections disappear from the serialized payload
#[test]
fn test_section_presence_in_serialized_payload() {
    let (config, vocabulary) = defaults();
    let report = generate_report(ProgramYear::Four, &[], &config, &vocabulary);
    let payload = serde_json::to_value(&report).unwrap();

    assert!(payload.get("summary").is_some());
    assert!(payload.get("urgency").is_none());
    assert!(payload.get("weekSamples").is_none());
    assert!(payload.get("yearTwoWeeks").is_none());
}
