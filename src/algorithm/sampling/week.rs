//! Calendar-week sampling
//!
//! Regulatory sample reports are built from the busiest Monday-starting
//! weeks of a reporting period. Records group by the Monday of their week;
//! weeks can be restricted to a calendar-month window and to a minimum
//! number of distinct consultation days, then the top weeks by record
//! count are kept. Ties keep first-encountered order, which the stable
//! sort preserves.

use chrono::{Datelike, Days, NaiveDate};
use linked_hash_map::LinkedHashMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::models::ClinicalRecord;

/// Parameters of one best-week selection
#[derive(Debug, Clone, Default)]
pub struct WeekSelection {
    /// Maximum number of weeks returned
    pub limit: usize,
    /// Minimum distinct consultation days a week must cover
    pub min_days_per_week: Option<u32>,
    /// First eligible calendar month of the week's Monday
    pub start_month: Option<u32>,
    /// Last eligible calendar month of the week's Monday
    pub end_month: Option<u32>,
}

/// A selected sample week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSample {
    /// Monday of the week; the grouping key
    pub week_key: NaiveDate,
    /// First day of the week (same as the key)
    pub start_date: NaiveDate,
    /// Last day of the week (Monday + 6)
    pub end_date: NaiveDate,
    /// Number of records falling in the week
    pub record_count: u64,
    /// Number of distinct calendar days touched
    pub unique_day_count: u32,
}

/// Monday of the week containing `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Select the busiest weeks of a record collection
///
/// Records without a date contribute to no week. The month window applies
/// to the month of the week's Monday, not of the individual records.
#[must_use]
pub fn select_best_weeks<'a, I>(records: I, selection: &WeekSelection) -> Vec<WeekSample>
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
{
    struct WeekAccumulator {
        record_count: u64,
        days: FxHashSet<NaiveDate>,
    }

    let mut weeks: LinkedHashMap<NaiveDate, WeekAccumulator> = LinkedHashMap::new();
    for record in records {
        let Some(date) = record.date else { continue };
        let accumulator = weeks
            .entry(week_start(date))
            .or_insert_with(|| WeekAccumulator {
                record_count: 0,
                days: FxHashSet::default(),
            });
        accumulator.record_count += 1;
        accumulator.days.insert(date);
    }

    let candidate_count = weeks.len();
    let mut samples: Vec<WeekSample> = weeks
        .into_iter()
        .filter(|(monday, _)| {
            let month = monday.month();
            selection.start_month.is_none_or(|start| month >= start)
                && selection.end_month.is_none_or(|end| month <= end)
        })
        .map(|(monday, accumulator)| WeekSample {
            week_key: monday,
            start_date: monday,
            end_date: monday + Days::new(6),
            record_count: accumulator.record_count,
            unique_day_count: accumulator.days.len() as u32,
        })
        .filter(|sample| {
            selection
                .min_days_per_week
                .is_none_or(|min| sample.unique_day_count >= min)
        })
        .collect();

    samples.sort_by(|a, b| b.record_count.cmp(&a.record_count));
    samples.truncate(selection.limit);

    log::debug!(
        "selected {} of {} candidate weeks",
        samples.len(),
        candidate_count
    );
    samples
}

/// Records whose date falls inside one of the given sample weeks,
/// in input order
#[must_use]
pub fn records_in_weeks<'a, I>(records: I, weeks: &[WeekSample]) -> Vec<&'a ClinicalRecord>
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
{
    let selected: FxHashSet<NaiveDate> = weeks.iter().map(|week| week.week_key).collect();
    records
        .into_iter()
        .filter(|record| {
            record
                .date
                .is_some_and(|date| selected.contains(&week_start(date)))
        })
        .collect()
}
