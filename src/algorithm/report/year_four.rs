//! Program-year 4 sample report
//!
//! The final-year report counts the whole year, not a sampled subset:
//! every unit consultation of a valid type performed at full autonomy
//! flows into a single summary. No week sampling, no urgency section, no
//! internship samples.

use crate::algorithm::report::summary::build_summary;
use crate::algorithm::report::ReportPayload;
use crate::config::{ReportConfig, Vocabulary};
use crate::models::{ClinicalRecord, ProgramYear};

/// Build the year-4 report payload
#[must_use]
pub fn build(
    records: &[ClinicalRecord],
    config: &ReportConfig,
    vocabulary: &Vocabulary,
) -> ReportPayload {
    let qualifying = records.iter().filter(|record| {
        record.location.as_deref() == Some(config.unit_location.as_str())
            && record.autonomy.as_deref() == Some(config.full_autonomy.as_str())
            && record
                .record_type
                .as_ref()
                .is_some_and(|t| config.unit_types.contains(t))
    });

    ReportPayload {
        program_year: ProgramYear::Four.as_u8(),
        summary: Some(build_summary(qualifying, vocabulary)),
        week_samples: None,
        unit_breakdown: None,
        urgency: None,
        year_two_weeks: None,
        year_three_weeks: None,
        top_problems: None,
        complementary_samples: None,
    }
}
