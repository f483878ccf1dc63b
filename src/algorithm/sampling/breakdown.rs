//! Unit-sample breakdown
//!
//! A three-level nested tally over a record subset: autonomy level, then
//! presential state, then consultation type. Only records whose type is in
//! the configured valid set participate; a record with an unknown or
//! missing type is excluded entirely rather than bucketed under "other".
//! Absence of the presential flag counts as remote (see
//! `PresentialState::from_flag`).

use linked_hash_map::LinkedHashMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::models::types::PresentialState;
use crate::models::ClinicalRecord;

/// Per-(autonomy, presential-state) cell with its type tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentialBreakdown {
    /// Records in this cell
    pub count: u64,
    /// Records per consultation type in this cell
    pub by_type: LinkedHashMap<String, u64>,
}

/// Per-autonomy-level slice of the breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomyBreakdown {
    /// Records at this autonomy level
    pub count: u64,
    /// Presential/remote split of the level
    pub by_presential_state: LinkedHashMap<String, PresentialBreakdown>,
}

/// Three-level tally over a unit record sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSampleBreakdown {
    /// Records counted into the breakdown
    pub total_count: u64,
    /// Per-autonomy-level slices, first-seen order
    pub by_autonomy: LinkedHashMap<String, AutonomyBreakdown>,
}

/// Build the nested tally over the given records
///
/// Records missing a valid type or an autonomy level are excluded, which
/// keeps the leaf type counts summing to `total_count`.
#[must_use]
pub fn build_breakdown<'a, I>(records: I, valid_types: &FxHashSet<String>) -> UnitSampleBreakdown
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
{
    let mut breakdown = UnitSampleBreakdown::default();

    for record in records {
        let Some(record_type) = record.record_type.as_deref() else {
            continue;
        };
        if !valid_types.contains(record_type) {
            continue;
        }
        let Some(autonomy) = record.autonomy.as_deref() else {
            continue;
        };
        let state = PresentialState::from_flag(record.presential);

        breakdown.total_count += 1;
        let level = breakdown
            .by_autonomy
            .entry(autonomy.to_string())
            .or_insert_with(AutonomyBreakdown::default);
        level.count += 1;
        let cell = level
            .by_presential_state
            .entry(state.as_str().to_string())
            .or_insert_with(PresentialBreakdown::default);
        cell.count += 1;
        *cell.by_type.entry(record_type.to_string()).or_insert(0) += 1;
    }

    breakdown
}
