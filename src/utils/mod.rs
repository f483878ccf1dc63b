//! Shared helpers for code-list handling and category keys.
//!
//! Clinical code fields arrive in mixed legacy shapes: proper arrays,
//! single codes, or comma/semicolon-joined strings. Everything that tallies
//! codes goes through `split_codes` so the same cleaning rules apply
//! everywhere.

use smallvec::SmallVec;

/// Split a possibly comma- or semicolon-joined code value into clean tokens.
///
/// Tokens are trimmed; empty tokens are dropped.
#[must_use]
pub fn split_codes(value: &str) -> SmallVec<[String; 4]> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Explode a list of code values into clean tokens.
///
/// Each element may itself be a joined list; see [`split_codes`].
#[must_use]
pub fn explode_codes(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| split_codes(value))
        .collect()
}

/// Fold a free-vocabulary category value into its canonical key form.
///
/// Category matching (internship rotations, referral categories) is
/// case-insensitive; surrounding whitespace is never significant.
#[must_use]
pub fn fold_key(value: &str) -> String {
    value.trim().to_lowercase()
}
