//! Top-frequency code ranking
//!
//! Extracts a coded field from every record, cleans and tallies the
//! tokens, and keeps the most frequent codes. Ties beyond the cutoff keep
//! first-seen order via the stable sort.

use linked_hash_map::LinkedHashMap;

use crate::algorithm::CategoryCount;
use crate::models::ClinicalRecord;
use crate::utils::split_codes;

/// Default number of codes reported
pub const DEFAULT_CODE_LIMIT: usize = 20;

/// Rank the most frequent codes of an extracted field
///
/// The extractor returns the raw code list of one record; elements may be
/// comma- or semicolon-joined and are split, trimmed, and stripped of
/// blanks before tallying.
#[must_use]
pub fn top_codes<'a, I, F>(records: I, extract: F, limit: usize) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a ClinicalRecord>,
    F: for<'r> Fn(&'r ClinicalRecord) -> &'r [String],
{
    let mut tally: LinkedHashMap<String, u64> = LinkedHashMap::new();
    for record in records {
        for value in extract(record) {
            for token in split_codes(value) {
                *tally.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut rows: Vec<CategoryCount> = tally
        .into_iter()
        .map(|(key, count)| CategoryCount { key, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(limit);
    rows
}
