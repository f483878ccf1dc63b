//! Record filtering
//!
//! A sparse [`FilterSpec`] from the dashboard compiles into an [`Expr`]
//! tree evaluated against in-memory records, or handed to a query layer
//! as constraints.

pub mod expr;
pub mod spec;

pub use expr::{Expr, LiteralValue};
pub use spec::{AgeRange, DateRange, FilterSpec};
