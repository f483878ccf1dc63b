//! Analytics algorithms
//!
//! Pure functions over already-materialized record collections: the
//! dashboard metrics aggregator, the sampling primitives, and the
//! per-program-year report pipelines that compose them.

pub mod metrics;
pub mod report;
pub mod sampling;

use serde::Serialize;

/// One row of a categorical or frequency breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Observed category value
    pub key: String,
    /// Number of records carrying the value
    pub count: u64,
}

/// One row of a labelled breakdown (consultation types)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelledCount {
    /// Category code
    pub key: String,
    /// Human-readable label; the code itself when no label is configured
    pub label: String,
    /// Number of records carrying the code
    pub count: u64,
}
