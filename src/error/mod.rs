//! Error handling for the analytics engine.
//!
//! The engine degrades gracefully on malformed record data (missing fields
//! are skipped, unparsable dates are excluded from date-dependent
//! computations), so the error surface is deliberately small: a filter
//! expression referencing a field the record model does not have, and a
//! report request for a program year no pipeline is defined for.

/// Specialized error type for engine operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A filter expression referenced an unknown record field
    #[error("unknown filter field: {0}")]
    UnknownField(String),
    /// No report pipeline is defined for the requested program year
    #[error("no report defined for program year {0}")]
    UnknownReport(u8),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
