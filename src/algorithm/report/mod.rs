//! Per-program-year report pipelines
//!
//! Three fixed pipelines compose the sampling primitives over differently
//! filtered record slices. Each produces a single [`ReportPayload`] whose
//! optional sections are present only when the pipeline performed the
//! corresponding computation; an absent section means "not applicable to
//! this program year", not "no data yet".

pub mod summary;
pub mod year_four;
pub mod year_one;
pub mod year_two_three;

use serde::Serialize;

use crate::algorithm::sampling::{UnitSampleBreakdown, UrgencySelection, WeekSample};
use crate::algorithm::CategoryCount;
use crate::config::{ReportConfig, Vocabulary};
use crate::error::Result;
use crate::models::{ClinicalRecord, ProgramYear};

pub use summary::{build_summary, ReportSummary};

/// Sampled weeks for one complementary-training internship group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipSample {
    /// Group label from the configuration
    pub label: String,
    /// Best weeks of the group's encounters
    pub weeks: Vec<WeekSample>,
}

/// Structured sample-report payload
///
/// Downstream rendering switches on section presence, so sections are
/// omitted from serialization when not applicable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    /// Program year the report was requested for
    pub program_year: u8,
    /// Consultation summary (years 1 and 4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
    /// Selected unit weeks (year 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_samples: Option<Vec<WeekSample>>,
    /// Nested unit breakdown over the sampled weeks (year 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_breakdown: Option<UnitSampleBreakdown>,
    /// Urgent-care day selections (years 1 through 3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Vec<UrgencySelection>>,
    /// Selected unit weeks of program year 2 (years 2-3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_two_weeks: Option<Vec<WeekSample>>,
    /// Selected unit weeks of program year 3 (years 2-3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_three_weeks: Option<Vec<WeekSample>>,
    /// Most frequent problem codes over the sampled weeks (years 2-3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_problems: Option<Vec<CategoryCount>>,
    /// Complementary-training week samples (years 2-3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complementary_samples: Option<Vec<InternshipSample>>,
}

/// Build the report for a program year
#[must_use]
pub fn generate_report(
    year: ProgramYear,
    records: &[ClinicalRecord],
    config: &ReportConfig,
    vocabulary: &Vocabulary,
) -> ReportPayload {
    log::info!(
        "generating program-year {} report over {} records",
        year.as_u8(),
        records.len()
    );
    match year {
        ProgramYear::One => year_one::build(records, config, vocabulary),
        ProgramYear::Two | ProgramYear::Three => {
            year_two_three::build(year, records, config, vocabulary)
        }
        ProgramYear::Four => year_four::build(records, config, vocabulary),
    }
}

/// Build the report for a numeric program year
///
/// # Errors
/// Returns `EngineError::UnknownReport` when no pipeline exists for the
/// requested year.
pub fn generate_report_for_year(
    year: u8,
    records: &[ClinicalRecord],
    config: &ReportConfig,
    vocabulary: &Vocabulary,
) -> Result<ReportPayload> {
    let year = ProgramYear::try_from(year)?;
    Ok(generate_report(year, records, config, vocabulary))
}
