//! Urgency-day selection
//!
//! Urgent-care encounters are sampled by busiest calendar day per rotation
//! category. Records group by (category, day); each configured group keeps
//! its top days by count, and the group totals cover the selected days
//! only. The regulatory rule is "count only the N busiest shifts", so
//! matching days beyond the limit are deliberately left out of the totals.

use chrono::NaiveDate;
use linked_hash_map::LinkedHashMap;
use serde::Serialize;

use crate::config::UrgencyGroup;
use crate::models::ClinicalRecord;
use crate::utils::fold_key;

/// One selected urgent-care day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyDay {
    /// Calendar day
    pub date: NaiveDate,
    /// Number of encounters on the day
    pub count: u64,
    /// Encounters per autonomy level on the day
    pub autonomy_counts: LinkedHashMap<String, u64>,
}

/// Selected days and totals for one urgency group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencySelection {
    /// Group label from the configuration
    pub label: String,
    /// The busiest days, descending by count
    pub days: Vec<UrgencyDay>,
    /// Sum of the selected days' counts only
    pub total_count: u64,
    /// Autonomy tallies merged over the selected days only
    pub autonomy_totals: LinkedHashMap<String, u64>,
}

/// Per-day accumulator before group selection
struct DayAccumulator {
    count: u64,
    autonomy: LinkedHashMap<String, u64>,
}

/// Select the busiest days per configured group
///
/// A record's category is its case-folded internship rotation; records
/// without a rotation or a date are ignored. Groups with no matching days
/// are omitted from the result.
#[must_use]
pub fn select_top_days<'a, I>(records: I, groups: &[UrgencyGroup]) -> Vec<UrgencySelection>
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
{
    let mut days: LinkedHashMap<(String, NaiveDate), DayAccumulator> = LinkedHashMap::new();
    for record in records {
        let (Some(category), Some(date)) = (record.internship_key(), record.date) else {
            continue;
        };
        let accumulator = days
            .entry((category, date))
            .or_insert_with(|| DayAccumulator {
                count: 0,
                autonomy: LinkedHashMap::new(),
            });
        accumulator.count += 1;
        if let Some(autonomy) = &record.autonomy {
            *accumulator.autonomy.entry(autonomy.clone()).or_insert(0) += 1;
        }
    }

    let mut selections = Vec::new();
    for group in groups {
        let matcher: Vec<String> = group.match_categories.iter().map(|c| fold_key(c)).collect();
        let mut group_days: Vec<(&NaiveDate, &DayAccumulator)> = days
            .iter()
            .filter(|((category, _), _)| matcher.iter().any(|wanted| wanted == category))
            .map(|((_, date), accumulator)| (date, accumulator))
            .collect();
        if group_days.is_empty() {
            continue;
        }

        group_days.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        group_days.truncate(group.day_limit);

        let mut total_count = 0;
        let mut autonomy_totals: LinkedHashMap<String, u64> = LinkedHashMap::new();
        let mut selected = Vec::with_capacity(group_days.len());
        for (date, accumulator) in group_days {
            total_count += accumulator.count;
            for (level, count) in &accumulator.autonomy {
                *autonomy_totals.entry(level.clone()).or_insert(0) += count;
            }
            selected.push(UrgencyDay {
                date: *date,
                count: accumulator.count,
                autonomy_counts: accumulator.autonomy.clone(),
            });
        }

        selections.push(UrgencySelection {
            label: group.label.clone(),
            days: selected,
            total_count,
            autonomy_totals,
        });
    }

    log::debug!(
        "urgency selection produced {} of {} configured groups",
        selections.len(),
        groups.len()
    );
    selections
}
