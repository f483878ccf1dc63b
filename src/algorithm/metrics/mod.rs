//! Dashboard metrics aggregation
//!
//! A single pass over the record collection populates every breakdown
//! table at once; there are no per-dimension passes. Null source fields
//! are skipped rather than counted under an "unknown" bucket. Tallies are
//! insertion-ordered so categorical tables come out in first-seen order
//! and repeated runs over the same input serialize byte-identically.

use linked_hash_map::LinkedHashMap;

use crate::algorithm::{CategoryCount, LabelledCount};
use crate::config::Vocabulary;
use crate::models::types::PresentialState;
use crate::models::{ClinicalRecord, DetailValue};
use crate::utils::split_codes;

/// Fixed age-range bucket labels, seeded in this order
pub const AGE_RANGE_LABELS: [&str; 4] = ["0-17", "18-44", "45-64", "65+"];

/// Legacy key tallied when `newContraceptive` is the boolean `true`
const NEW_CONTRACEPTIVE_FLAG_KEY: &str = "Sim";

/// One referral category with its total and per-category motive tally
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCount {
    /// Referral category value
    pub key: String,
    /// Number of records declaring the category
    pub count: u64,
    /// Motive codes merged from every record declaring the category,
    /// sorted descending by frequency
    pub motives: Vec<CategoryCount>,
}

/// Full set of dashboard metrics over one record collection
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Number of records aggregated
    pub total_count: u64,
    /// Mean patient age in years over records with age and unit present;
    /// 0 when none qualify
    pub average_age: f64,
    /// Breakdown by patient sex
    pub by_sex: Vec<CategoryCount>,
    /// Breakdown by consultation type, with configured labels
    pub by_type: Vec<LabelledCount>,
    /// Breakdown by care location
    pub by_location: Vec<CategoryCount>,
    /// Breakdown by supervision autonomy level
    pub by_autonomy: Vec<CategoryCount>,
    /// Breakdown by smoker status
    pub by_smoker_status: Vec<CategoryCount>,
    /// Breakdown by fixed age ranges; zero buckets omitted
    pub by_age_range: Vec<CategoryCount>,
    /// Breakdown by in-person vs remote encounters
    pub by_presential: Vec<CategoryCount>,
    /// Breakdown of the vaccination plan flag
    pub by_vaccination_plan: Vec<CategoryCount>,
    /// Breakdown of the alcohol flag
    pub by_alcohol: Vec<CategoryCount>,
    /// Breakdown of the drugs flag
    pub by_drugs: Vec<CategoryCount>,
    /// Breakdown by household family type
    pub by_family_type: Vec<CategoryCount>,
    /// Breakdown by school level
    pub by_school_level: Vec<CategoryCount>,
    /// Breakdown by professional situation
    pub by_professional_situation: Vec<CategoryCount>,
    /// Breakdown of the own-list flag
    pub by_own_list: Vec<CategoryCount>,
    /// Breakdown by contraceptive in use (string values only)
    pub by_contraceptive: Vec<CategoryCount>,
    /// Breakdown by newly prescribed contraceptive
    pub by_new_contraceptive: Vec<CategoryCount>,
    /// Diagnosis code frequencies, sorted descending
    pub by_diagnosis: Vec<CategoryCount>,
    /// Problem code frequencies, sorted descending
    pub by_problems: Vec<CategoryCount>,
    /// New-diagnosis code frequencies, sorted descending
    pub by_new_diagnosis: Vec<CategoryCount>,
    /// Two-level referral breakdown: category totals with motive tallies
    pub by_referral: Vec<ReferralCount>,
}

/// Insertion-ordered tally map
type Tally = LinkedHashMap<String, u64>;

/// Single-pass aggregator over clinical records
#[derive(Debug)]
pub struct MetricsAggregator<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> MetricsAggregator<'a> {
    /// Create an aggregator using the given label vocabulary
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Aggregate a record collection into the full metrics set
    #[must_use]
    pub fn aggregate(&self, records: &[ClinicalRecord]) -> Metrics {
        let mut state = AggregationState::new();

        for record in records {
            state.observe(record);
        }

        log::debug!(
            "aggregated {} records ({} with usable age)",
            records.len(),
            state.age_count
        );

        state.finish(records.len() as u64, self.vocabulary)
    }
}

/// Mutable tally state for one aggregation pass
struct AggregationState {
    age_sum: f64,
    age_count: u64,
    by_sex: Tally,
    by_type: Tally,
    by_location: Tally,
    by_autonomy: Tally,
    by_smoker_status: Tally,
    by_age_range: Tally,
    by_presential: Tally,
    by_vaccination_plan: Tally,
    by_alcohol: Tally,
    by_drugs: Tally,
    by_family_type: Tally,
    by_school_level: Tally,
    by_professional_situation: Tally,
    by_own_list: Tally,
    by_contraceptive: Tally,
    by_new_contraceptive: Tally,
    by_diagnosis: Tally,
    by_problems: Tally,
    by_new_diagnosis: Tally,
    by_referral: LinkedHashMap<String, (u64, Tally)>,
}

impl AggregationState {
    fn new() -> Self {
        // Age buckets are seeded so their output order is fixed; every
        // other table fills in first-seen order.
        let mut by_age_range = Tally::new();
        for label in AGE_RANGE_LABELS {
            by_age_range.insert(label.to_string(), 0);
        }

        Self {
            age_sum: 0.0,
            age_count: 0,
            by_sex: Tally::new(),
            by_type: Tally::new(),
            by_location: Tally::new(),
            by_autonomy: Tally::new(),
            by_smoker_status: Tally::new(),
            by_age_range,
            by_presential: Tally::new(),
            by_vaccination_plan: Tally::new(),
            by_alcohol: Tally::new(),
            by_drugs: Tally::new(),
            by_family_type: Tally::new(),
            by_school_level: Tally::new(),
            by_professional_situation: Tally::new(),
            by_own_list: Tally::new(),
            by_contraceptive: Tally::new(),
            by_new_contraceptive: Tally::new(),
            by_diagnosis: Tally::new(),
            by_problems: Tally::new(),
            by_new_diagnosis: Tally::new(),
            by_referral: LinkedHashMap::new(),
        }
    }

    fn observe(&mut self, record: &ClinicalRecord) {
        bump_opt(&mut self.by_sex, record.sex.as_deref());
        bump_opt(&mut self.by_type, record.record_type.as_deref());
        bump_opt(&mut self.by_location, record.location.as_deref());
        bump_opt(&mut self.by_autonomy, record.autonomy.as_deref());
        bump_opt(&mut self.by_smoker_status, record.smoker_status.as_deref());
        bump_opt(&mut self.by_family_type, record.family_type.as_deref());
        bump_opt(&mut self.by_school_level, record.school_level.as_deref());
        bump_opt(
            &mut self.by_professional_situation,
            record.professional_situation.as_deref(),
        );

        if let Some(years) = record.age_in_years() {
            self.age_sum += years;
            self.age_count += 1;
            bump(&mut self.by_age_range, age_bucket(years));
        }

        if let Some(flag) = record.presential {
            bump(
                &mut self.by_presential,
                PresentialState::from_flag(Some(flag)).as_str(),
            );
        }
        bump_flag(&mut self.by_vaccination_plan, record.vaccination_plan);
        bump_flag(&mut self.by_alcohol, record.alcohol);
        bump_flag(&mut self.by_drugs, record.drugs);
        bump_flag(&mut self.by_own_list, record.details.own_list);

        // Contraceptive only counts string values; legacy boolean
        // encodings are skipped here, unlike newContraceptive below.
        if let Some(value) = record.details.contraceptive.as_ref().and_then(DetailValue::as_text) {
            bump(&mut self.by_contraceptive, value);
        }
        match &record.details.new_contraceptive {
            Some(DetailValue::Text(value)) => bump(&mut self.by_new_contraceptive, value),
            Some(flag) if flag.is_true() => {
                bump(&mut self.by_new_contraceptive, NEW_CONTRACEPTIVE_FLAG_KEY);
            }
            _ => {}
        }

        bump_codes(&mut self.by_diagnosis, &record.details.diagnosis);
        bump_codes(&mut self.by_problems, &record.details.problems);
        bump_codes(&mut self.by_new_diagnosis, &record.details.new_diagnosis);

        // Every referral category on the record receives the record's
        // full motive list: a record with categories [A, B] and motive
        // [m1] contributes m1 to both A and B.
        for category in &record.details.referral {
            let category = category.trim();
            if category.is_empty() {
                continue;
            }
            let entry = self
                .by_referral
                .entry(category.to_string())
                .or_insert_with(|| (0, Tally::new()));
            entry.0 += 1;
            for motive in &record.details.referral_motive {
                for token in split_codes(motive) {
                    *entry.1.entry(token).or_insert(0) += 1;
                }
            }
        }
    }

    fn finish(self, total_count: u64, vocabulary: &Vocabulary) -> Metrics {
        let average_age = if self.age_count > 0 {
            self.age_sum / self.age_count as f64
        } else {
            0.0
        };

        let by_type = self
            .by_type
            .into_iter()
            .map(|(key, count)| LabelledCount {
                label: vocabulary.type_label(&key).to_string(),
                key,
                count,
            })
            .collect();

        let by_referral = self
            .by_referral
            .into_iter()
            .map(|(key, (count, motives))| ReferralCount {
                key,
                count,
                motives: frequency_rows(motives),
            })
            .collect();

        Metrics {
            total_count,
            average_age,
            by_sex: categorical_rows(self.by_sex),
            by_type,
            by_location: categorical_rows(self.by_location),
            by_autonomy: categorical_rows(self.by_autonomy),
            by_smoker_status: categorical_rows(self.by_smoker_status),
            by_age_range: categorical_rows(self.by_age_range),
            by_presential: categorical_rows(self.by_presential),
            by_vaccination_plan: categorical_rows(self.by_vaccination_plan),
            by_alcohol: categorical_rows(self.by_alcohol),
            by_drugs: categorical_rows(self.by_drugs),
            by_family_type: categorical_rows(self.by_family_type),
            by_school_level: categorical_rows(self.by_school_level),
            by_professional_situation: categorical_rows(self.by_professional_situation),
            by_own_list: categorical_rows(self.by_own_list),
            by_contraceptive: categorical_rows(self.by_contraceptive),
            by_new_contraceptive: categorical_rows(self.by_new_contraceptive),
            by_diagnosis: frequency_rows(self.by_diagnosis),
            by_problems: frequency_rows(self.by_problems),
            by_new_diagnosis: frequency_rows(self.by_new_diagnosis),
            by_referral,
        }
    }
}

/// Fixed age bucket for a normalized age in years
#[must_use]
pub fn age_bucket(years: f64) -> &'static str {
    if years < 18.0 {
        AGE_RANGE_LABELS[0]
    } else if years < 45.0 {
        AGE_RANGE_LABELS[1]
    } else if years < 65.0 {
        AGE_RANGE_LABELS[2]
    } else {
        AGE_RANGE_LABELS[3]
    }
}

fn bump(tally: &mut Tally, key: &str) {
    *tally.entry(key.to_string()).or_insert(0) += 1;
}

fn bump_opt(tally: &mut Tally, value: Option<&str>) {
    if let Some(value) = value {
        bump(tally, value);
    }
}

fn bump_flag(tally: &mut Tally, flag: Option<bool>) {
    if let Some(flag) = flag {
        bump(tally, if flag { "yes" } else { "no" });
    }
}

fn bump_codes(tally: &mut Tally, values: &[String]) {
    for value in values {
        for token in split_codes(value) {
            *tally.entry(token).or_insert(0) += 1;
        }
    }
}

/// First-seen-order rows; zero-count seeds are dropped
fn categorical_rows(tally: Tally) -> Vec<CategoryCount> {
    tally
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(key, count)| CategoryCount { key, count })
        .collect()
}

/// Rows sorted descending by count; ties keep first-seen order
fn frequency_rows(tally: Tally) -> Vec<CategoryCount> {
    let mut rows = categorical_rows(tally);
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
