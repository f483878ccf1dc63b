//! Deterministic analytics and regulatory sampling over clinical
//! encounter records: multi-dimensional dashboard metrics, calendar-week
//! and urgency-day sampling, and per-program-year report pipelines.
//!
//! The engine is pure data in, pure data out. Records arrive as an
//! in-memory collection already scoped by the persistence layer; every
//! computation is a synchronous total function that never mutates its
//! input, so identical input always serializes to identical output. That
//! reproducibility is a hard requirement: the report payloads are used as
//! regulatory compliance evidence.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ReportConfig, Vocabulary};
pub use error::{EngineError, Result};
pub use models::{AgeUnit, ClinicalRecord, EncounterDetails, PresentialState, ProgramYear};

// Filtering capabilities
pub use filter::{Expr, FilterSpec, LiteralValue};

// Aggregation and reporting
pub use algorithm::metrics::{Metrics, MetricsAggregator};
pub use algorithm::report::{generate_report, generate_report_for_year, ReportPayload};
pub use algorithm::sampling::{WeekSample, WeekSelection};
