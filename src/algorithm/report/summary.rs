//! Consultation summary shared by the report pipelines
//!
//! Each pipeline reports the same compact summary shape over a different
//! record slice: totals by consultation type and autonomy level plus the
//! mean patient age.

use linked_hash_map::LinkedHashMap;
use serde::Serialize;

use crate::algorithm::{CategoryCount, LabelledCount};
use crate::config::Vocabulary;
use crate::models::ClinicalRecord;

/// Summary section of a sample report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Number of consultations summarized
    pub total_consultations: u64,
    /// Consultations per type, with configured labels, first-seen order
    pub by_type: Vec<LabelledCount>,
    /// Consultations per autonomy level, first-seen order
    pub by_autonomy: Vec<CategoryCount>,
    /// Mean patient age in years; 0 when no record carries a usable age
    pub average_age: f64,
}

/// Build the summary over a record slice
#[must_use]
pub fn build_summary<'a, I>(records: I, vocabulary: &Vocabulary) -> ReportSummary
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
{
    let mut total = 0;
    let mut by_type: LinkedHashMap<String, u64> = LinkedHashMap::new();
    let mut by_autonomy: LinkedHashMap<String, u64> = LinkedHashMap::new();
    let mut age_sum = 0.0;
    let mut age_count = 0u64;

    for record in records {
        total += 1;
        if let Some(record_type) = &record.record_type {
            *by_type.entry(record_type.clone()).or_insert(0) += 1;
        }
        if let Some(autonomy) = &record.autonomy {
            *by_autonomy.entry(autonomy.clone()).or_insert(0) += 1;
        }
        if let Some(years) = record.age_in_years() {
            age_sum += years;
            age_count += 1;
        }
    }

    ReportSummary {
        total_consultations: total,
        by_type: by_type
            .into_iter()
            .map(|(key, count)| LabelledCount {
                label: vocabulary.type_label(&key).to_string(),
                key,
                count,
            })
            .collect(),
        by_autonomy: by_autonomy
            .into_iter()
            .map(|(key, count)| CategoryCount { key, count })
            .collect(),
        average_age: if age_count > 0 {
            age_sum / age_count as f64
        } else {
            0.0
        },
    }
}
