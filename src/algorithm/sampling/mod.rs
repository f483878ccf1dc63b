//! Sampling primitives for regulatory reports
//!
//! Four building blocks composed by the report pipelines: calendar-week
//! selection, urgency-day selection, the nested unit-sample breakdown,
//! and top-frequency code ranking.

pub mod breakdown;
pub mod codes;
pub mod urgency;
pub mod week;

pub use breakdown::{build_breakdown, UnitSampleBreakdown};
pub use codes::{top_codes, DEFAULT_CODE_LIMIT};
pub use urgency::{select_top_days, UrgencyDay, UrgencySelection};
pub use week::{records_in_weeks, select_best_weeks, week_start, WeekSample, WeekSelection};
