//! Program-year 1 sample report
//!
//! The first-year sample covers the second semester: the four busiest unit
//! weeks with at least three consultation days each, restricted to
//! calendar months 7 through 12. The summary and the unit breakdown cover
//! exactly the records inside the selected weeks. Urgent-care encounters
//! are reported separately through the urgency-day selector.

use crate::algorithm::report::summary::build_summary;
use crate::algorithm::report::ReportPayload;
use crate::algorithm::sampling::{
    build_breakdown, records_in_weeks, select_best_weeks, select_top_days, WeekSelection,
};
use crate::config::{ReportConfig, Vocabulary};
use crate::models::{ClinicalRecord, ProgramYear};

/// Build the year-1 report payload
#[must_use]
pub fn build(
    records: &[ClinicalRecord],
    config: &ReportConfig,
    vocabulary: &Vocabulary,
) -> ReportPayload {
    let unit_records: Vec<&ClinicalRecord> = records
        .iter()
        .filter(|record| {
            record.location.as_deref() == Some(config.unit_location.as_str())
                && record
                    .record_type
                    .as_ref()
                    .is_some_and(|t| config.unit_types.contains(t))
        })
        .collect();

    let selection = WeekSelection {
        limit: config.year_one.week_limit,
        min_days_per_week: Some(config.year_one.min_days_per_week),
        start_month: Some(config.year_one.start_month),
        end_month: Some(config.year_one.end_month),
    };
    let weeks = select_best_weeks(unit_records.iter().copied(), &selection);
    let sampled = records_in_weeks(unit_records.iter().copied(), &weeks);

    let summary = build_summary(sampled.iter().copied(), vocabulary);
    let unit_breakdown = build_breakdown(sampled.iter().copied(), &config.unit_types);

    let urgent_records = records
        .iter()
        .filter(|record| record.location.as_deref() == Some(config.urgent_location.as_str()));
    let urgency = select_top_days(urgent_records, &config.year_one.urgency);

    ReportPayload {
        program_year: ProgramYear::One.as_u8(),
        summary: Some(summary),
        week_samples: Some(weeks),
        unit_breakdown: Some(unit_breakdown),
        urgency: Some(urgency),
        year_two_weeks: None,
        year_three_weeks: None,
        top_problems: None,
        complementary_samples: None,
    }
}
