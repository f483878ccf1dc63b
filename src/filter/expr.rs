//! Expression-based filtering for clinical records
//!
//! This module provides an expression-based filtering system that allows
//! selecting encounter records by field values. The same expression shape
//! doubles as a query-constraint description for remote query layers, so
//! a compiled filter can run in memory or be pushed down unchanged.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{EngineError, Result};
use crate::models::ClinicalRecord;

/// Represents a filter expression over encounter records
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field equals a literal value
    Eq(String, LiteralValue),

    /// Field not equals a literal value
    NotEq(String, LiteralValue),

    /// Field is greater than a literal value
    Gt(String, LiteralValue),

    /// Field is greater than or equal to a literal value
    GtEq(String, LiteralValue),

    /// Field is less than a literal value
    Lt(String, LiteralValue),

    /// Field is less than or equal to a literal value
    LtEq(String, LiteralValue),

    /// Field is in a set of values
    In(String, Vec<LiteralValue>),

    /// Field is null
    IsNull(String),

    /// Field is not null
    IsNotNull(String),

    /// Field value contains a substring (case-insensitive; any element
    /// matches on list-valued fields)
    Contains(String, String),

    /// Field value starts with a prefix (case-insensitive; any element
    /// matches on list-valued fields)
    StartsWith(String, String),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Logical OR of expressions
    Or(Vec<Expr>),

    /// Logical NOT of an expression
    Not(Box<Expr>),

    /// Always evaluates to true
    AlwaysTrue,

    /// Always evaluates to false
    AlwaysFalse,
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Boolean value
    Boolean(bool),

    /// Integer value
    Int(i64),

    /// Floating point value
    Float(f64),

    /// String value
    String(String),

    /// Calendar date value
    Date(NaiveDate),
}

/// A record field resolved for evaluation
enum FieldValue<'a> {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Date(NaiveDate),
    StrList(&'a [String]),
}

impl Expr {
    /// Returns the set of all field names required by this expression
    #[must_use]
    pub fn required_fields(&self) -> HashSet<String> {
        let mut fields = HashSet::new();
        self.collect_required_fields(&mut fields);
        fields
    }

    /// Helper method to collect field names
    fn collect_required_fields(&self, fields: &mut HashSet<String>) {
        match self {
            Self::Eq(field, _)
            | Self::NotEq(field, _)
            | Self::Gt(field, _)
            | Self::GtEq(field, _)
            | Self::Lt(field, _)
            | Self::LtEq(field, _)
            | Self::In(field, _)
            | Self::IsNull(field)
            | Self::IsNotNull(field)
            | Self::Contains(field, _)
            | Self::StartsWith(field, _) => {
                fields.insert(field.clone());
            }
            Self::And(exprs) | Self::Or(exprs) => {
                for expr in exprs {
                    expr.collect_required_fields(fields);
                }
            }
            Self::Not(expr) => {
                expr.collect_required_fields(fields);
            }
            Self::AlwaysTrue | Self::AlwaysFalse => {}
        }
    }

    /// Evaluate this expression against a single record
    ///
    /// # Arguments
    /// * `record` - The record to evaluate against
    ///
    /// # Returns
    /// Whether the record matches the expression
    ///
    /// # Errors
    /// Returns an error if the expression references an unknown field
    pub fn matches(&self, record: &ClinicalRecord) -> Result<bool> {
        match self {
            Self::AlwaysTrue => Ok(true),
            Self::AlwaysFalse => Ok(false),

            Self::And(exprs) => {
                for expr in exprs {
                    if !expr.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Self::Or(exprs) => {
                for expr in exprs {
                    if expr.matches(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            Self::Not(expr) => Ok(!expr.matches(record)?),

            Self::Eq(field, literal) => Ok(resolve_field(record, field)?.equals(literal)),

            Self::NotEq(field, literal) => {
                // Null never equals anything, and NotEq on null stays false:
                // missing fields do not match either polarity.
                let value = resolve_field(record, field)?;
                Ok(!value.is_missing() && !value.equals(literal))
            }

            Self::Gt(field, literal) => {
                Ok(resolve_field(record, field)?.compare(literal) == Some(std::cmp::Ordering::Greater))
            }

            Self::GtEq(field, literal) => Ok(matches!(
                resolve_field(record, field)?.compare(literal),
                Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
            )),

            Self::Lt(field, literal) => {
                Ok(resolve_field(record, field)?.compare(literal) == Some(std::cmp::Ordering::Less))
            }

            Self::LtEq(field, literal) => Ok(matches!(
                resolve_field(record, field)?.compare(literal),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            )),

            Self::In(field, values) => {
                let value = resolve_field(record, field)?;
                Ok(values.iter().any(|literal| value.equals(literal)))
            }

            Self::IsNull(field) => Ok(resolve_field(record, field)?.is_missing()),

            Self::IsNotNull(field) => Ok(!resolve_field(record, field)?.is_missing()),

            Self::Contains(field, needle) => {
                Ok(resolve_field(record, field)?.any_text(|text| {
                    text.to_lowercase().contains(&needle.to_lowercase())
                }))
            }

            Self::StartsWith(field, prefix) => {
                Ok(resolve_field(record, field)?.any_text(|text| {
                    text.to_lowercase().starts_with(&prefix.to_lowercase())
                }))
            }
        }
    }

    /// Filter a record collection, preserving input order
    ///
    /// # Errors
    /// Returns an error if the expression references an unknown field
    pub fn apply<'a>(&self, records: &'a [ClinicalRecord]) -> Result<Vec<&'a ClinicalRecord>> {
        let mut matched = Vec::new();
        for record in records {
            if self.matches(record)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }
}

impl<'a> FieldValue<'a> {
    fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    fn equals(&self, literal: &LiteralValue) -> bool {
        match (self, literal) {
            (Self::Bool(v), LiteralValue::Boolean(l)) => v == l,
            (Self::Int(v), LiteralValue::Int(l)) => v == l,
            (Self::Int(v), LiteralValue::Float(l)) => (*v as f64 - l).abs() < f64::EPSILON,
            (Self::Float(v), LiteralValue::Float(l)) => (v - l).abs() < f64::EPSILON,
            (Self::Float(v), LiteralValue::Int(l)) => (v - *l as f64).abs() < f64::EPSILON,
            (Self::Str(v), LiteralValue::String(l)) => v == l,
            (Self::Date(v), LiteralValue::Date(l)) => v == l,
            (Self::StrList(values), LiteralValue::String(l)) => {
                values.iter().any(|value| value == l)
            }
            _ => false,
        }
    }

    fn compare(&self, literal: &LiteralValue) -> Option<std::cmp::Ordering> {
        match (self, literal) {
            (Self::Int(v), LiteralValue::Int(l)) => Some(v.cmp(l)),
            (Self::Int(v), LiteralValue::Float(l)) => (*v as f64).partial_cmp(l),
            (Self::Float(v), LiteralValue::Float(l)) => v.partial_cmp(l),
            (Self::Float(v), LiteralValue::Int(l)) => v.partial_cmp(&(*l as f64)),
            (Self::Date(v), LiteralValue::Date(l)) => Some(v.cmp(l)),
            (Self::Str(v), LiteralValue::String(l)) => Some((*v).cmp(l.as_str())),
            _ => None,
        }
    }

    fn any_text(&self, predicate: impl Fn(&str) -> bool) -> bool {
        match self {
            Self::Str(value) => predicate(value),
            Self::StrList(values) => values.iter().any(|value| predicate(value)),
            _ => false,
        }
    }
}

/// Resolve a field name against a record
fn resolve_field<'a>(record: &'a ClinicalRecord, field: &str) -> Result<FieldValue<'a>> {
    let opt_str = |value: &'a Option<String>| {
        value.as_deref().map_or(FieldValue::Missing, FieldValue::Str)
    };
    let opt_bool =
        |value: &Option<bool>| value.map_or(FieldValue::Missing, FieldValue::Bool);

    let value = match field {
        "sex" => opt_str(&record.sex),
        "record_type" => opt_str(&record.record_type),
        "location" => opt_str(&record.location),
        "autonomy" => opt_str(&record.autonomy),
        "smoker_status" => opt_str(&record.smoker_status),
        "family_type" => opt_str(&record.family_type),
        "school_level" => opt_str(&record.school_level),
        "professional_situation" => opt_str(&record.professional_situation),
        "internship" => opt_str(&record.details.internship),
        "presential" => opt_bool(&record.presential),
        "vaccination_plan" => opt_bool(&record.vaccination_plan),
        "alcohol" => opt_bool(&record.alcohol),
        "drugs" => opt_bool(&record.drugs),
        "age" => record.age.map_or(FieldValue::Missing, FieldValue::Float),
        "age_unit" => record
            .age_unit
            .map_or(FieldValue::Missing, |unit| FieldValue::Str(unit.as_str())),
        "date" => record.date.map_or(FieldValue::Missing, FieldValue::Date),
        "program_year" => record
            .program_year
            .map_or(FieldValue::Missing, |year| FieldValue::Int(i64::from(year))),
        "diagnosis" => FieldValue::StrList(&record.details.diagnosis),
        "problems" => FieldValue::StrList(&record.details.problems),
        "new_diagnosis" => FieldValue::StrList(&record.details.new_diagnosis),
        "referral" => FieldValue::StrList(&record.details.referral),
        _ => return Err(EngineError::UnknownField(field.to_string())),
    };
    Ok(value)
}
