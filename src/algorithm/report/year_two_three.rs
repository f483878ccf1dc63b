//! Program-years 2-3 sample report
//!
//! The mid-residency sample splits unit consultations by program year and
//! selects fifteen best weeks per year with no month restriction. The top
//! problem codes are ranked over the union of both years' sampled-week
//! records. Urgent care reports four rotation groups, and complementary
//! training is sampled independently per internship group.

use itertools::Itertools;

use crate::algorithm::report::{InternshipSample, ReportPayload};
use crate::algorithm::sampling::{
    records_in_weeks, select_best_weeks, select_top_days, top_codes, WeekSelection,
};
use crate::config::{ReportConfig, Vocabulary};
use crate::models::{ClinicalRecord, ProgramYear};

/// Build the years-2/3 report payload
///
/// `year` is the requesting resident's program year and only stamps the
/// payload; the sample always covers both year slices.
#[must_use]
pub fn build(
    year: ProgramYear,
    records: &[ClinicalRecord],
    config: &ReportConfig,
    _vocabulary: &Vocabulary,
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
        limit: config.mid_years.week_limit,
        min_days_per_week: Some(config.mid_years.min_days_per_week),
        start_month: None,
        end_month: None,
    };

    let year_two_records: Vec<&ClinicalRecord> = unit_records
        .iter()
        .copied()
        .filter(|record| record.program_year == Some(2))
        .collect();
    let year_three_records: Vec<&ClinicalRecord> = unit_records
        .iter()
        .copied()
        .filter(|record| record.program_year == Some(3))
        .collect();

    let year_two_weeks = select_best_weeks(year_two_records.iter().copied(), &selection);
    let year_three_weeks = select_best_weeks(year_three_records.iter().copied(), &selection);

    // Top problems are ranked over the union of both years' sampled weeks.
    let sampled: Vec<&ClinicalRecord> = records_in_weeks(
        year_two_records.iter().copied(),
        &year_two_weeks,
    )
    .into_iter()
    .chain(records_in_weeks(
        year_three_records.iter().copied(),
        &year_three_weeks,
    ))
    .collect();
    let top_problems = top_codes(
        sampled.iter().copied(),
        |record| &record.details.problems,
        config.mid_years.top_codes_limit,
    );

    let urgent_records = records
        .iter()
        .filter(|record| record.location.as_deref() == Some(config.urgent_location.as_str()));
    let urgency = select_top_days(urgent_records, &config.mid_years.urgency);

    let complementary_records: Vec<&ClinicalRecord> = records
        .iter()
        .filter(|record| {
            record.location.as_deref() == Some(config.complementary_location.as_str())
        })
        .collect();
    let complementary_selection = WeekSelection {
        limit: config.mid_years.complementary_week_limit,
        ..WeekSelection::default()
    };
    let complementary_samples = config
        .mid_years
        .complementary
        .iter()
        .map(|group| {
            let group_records = complementary_records.iter().copied().filter(|record| {
                record
                    .internship_key()
                    .is_some_and(|key| group.internships.iter().contains(&key))
            });
            InternshipSample {
                label: group.label.clone(),
                weeks: select_best_weeks(group_records, &complementary_selection),
            }
        })
        .collect();

    ReportPayload {
        program_year: year.as_u8(),
        summary: None,
        week_samples: None,
        unit_breakdown: None,
        urgency: Some(urgency),
        year_two_weeks: Some(year_two_weeks),
        year_three_weeks: Some(year_three_weeks),
        top_problems: Some(top_problems),
        complementary_samples: Some(complementary_samples),
    }
}
