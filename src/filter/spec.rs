//! Dashboard filter specification and its compilation to expressions
//!
//! The UI hands the engine a sparse `FilterSpec`; compilation produces a
//! single [`Expr`] conjunction that can be evaluated in memory or handed
//! to a remote query layer as constraints.
//!
//! The one non-trivial rule is the age range. Stored ages keep their
//! original unit, so a requested range in years compiles to an OR of four
//! branches, one per unit, each bounding the *stored* numeric value on
//! that unit's scale. The week and day branches floor the lower bound and
//! ceil the upper bound so a boundary record unit-converts back into
//! range; the asymmetry is a regulatory boundary rule, not an accident.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::filter::expr::{Expr, LiteralValue};
use crate::models::types::AgeUnit;

/// Requested age window, in years
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct AgeRange {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
}

/// Requested encounter-date window
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct DateRange {
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
}

/// Sparse filter selection coming from the dashboard
///
/// Every field is optional; an absent field contributes no constraint.
/// Boolean fields are tri-state: `Some(false)` is an explicit filter on
/// `false`, not an unset filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Patient sex
    pub sex: Option<String>,
    /// Consultation type code
    pub record_type: Option<String>,
    /// Care location
    pub location: Option<String>,
    /// Supervision autonomy level
    pub autonomy: Option<String>,
    /// Smoker status
    pub smoker_status: Option<String>,
    /// In-person flag
    pub presential: Option<bool>,
    /// Vaccination plan flag
    pub vaccination_plan: Option<bool>,
    /// Alcohol consumption flag
    pub alcohol: Option<bool>,
    /// Drug consumption flag
    pub drugs: Option<bool>,
    /// Age window in years, expanded per stored unit
    pub age: Option<AgeRange>,
    /// Encounter date window
    pub date: Option<DateRange>,
    /// Diagnosis code prefix; matches `"CODE"` and `"CODE - description"`
    pub diagnosis_code: Option<String>,
    /// Problem code prefix; matches `"CODE"` and `"CODE - description"`
    pub problem_code: Option<String>,
    /// Consultation type to exclude
    pub exclude_type: Option<String>,
}

impl FilterSpec {
    /// Compile the selection into a single expression
    #[must_use]
    pub fn compile(&self) -> Expr {
        let mut clauses = Vec::new();

        let eq_str = |field: &str, value: &str| {
            Expr::Eq(field.to_string(), LiteralValue::String(value.to_string()))
        };

        if let Some(sex) = &self.sex {
            clauses.push(eq_str("sex", sex));
        }
        if let Some(record_type) = &self.record_type {
            clauses.push(eq_str("record_type", record_type));
        }
        if let Some(location) = &self.location {
            clauses.push(eq_str("location", location));
        }
        if let Some(autonomy) = &self.autonomy {
            clauses.push(eq_str("autonomy", autonomy));
        }
        if let Some(smoker_status) = &self.smoker_status {
            clauses.push(eq_str("smoker_status", smoker_status));
        }

        // Tri-state booleans: Some(false) filters on false.
        for (field, value) in [
            ("presential", self.presential),
            ("vaccination_plan", self.vaccination_plan),
            ("alcohol", self.alcohol),
            ("drugs", self.drugs),
        ] {
            if let Some(value) = value {
                clauses.push(Expr::Eq(field.to_string(), LiteralValue::Boolean(value)));
            }
        }

        if let Some(range) = self.age {
            if let Some(expr) = compile_age_range(range) {
                clauses.push(expr);
            }
        }

        if let Some(range) = self.date {
            if let Some(from) = range.from {
                clauses.push(Expr::GtEq("date".to_string(), LiteralValue::Date(from)));
            }
            if let Some(to) = range.to {
                clauses.push(Expr::LtEq("date".to_string(), LiteralValue::Date(to)));
            }
        }

        if let Some(code) = &self.diagnosis_code {
            clauses.push(Expr::StartsWith("diagnosis".to_string(), code.clone()));
        }
        if let Some(code) = &self.problem_code {
            clauses.push(Expr::StartsWith("problems".to_string(), code.clone()));
        }

        if let Some(excluded) = &self.exclude_type {
            clauses.push(Expr::Not(Box::new(eq_str("record_type", excluded))));
        }

        if clauses.is_empty() {
            Expr::AlwaysTrue
        } else {
            Expr::And(clauses)
        }
    }
}

/// Expand a year-denominated age window into one branch per stored unit
fn compile_age_range(range: AgeRange) -> Option<Expr> {
    if range.min.is_none() && range.max.is_none() {
        return None;
    }

    let branches = AgeUnit::all()
        .into_iter()
        .map(|unit| {
            let mut branch = vec![Expr::Eq(
                "age_unit".to_string(),
                LiteralValue::String(unit.as_str().to_string()),
            )];
            if let Some(min) = range.min {
                branch.push(Expr::GtEq(
                    "age".to_string(),
                    LiteralValue::Float(scale_bound(unit, min, Bound::Lower)),
                ));
            }
            if let Some(max) = range.max {
                branch.push(Expr::LtEq(
                    "age".to_string(),
                    LiteralValue::Float(scale_bound(unit, max, Bound::Upper)),
                ));
            }
            Expr::And(branch)
        })
        .collect();

    Some(Expr::Or(branches))
}

enum Bound {
    Lower,
    Upper,
}

/// Convert a year bound onto a unit's stored scale.
///
/// Week and day bounds round outward asymmetrically (floor the lower,
/// ceil the upper) so that a stored value on the boundary converts back
/// into the requested year range.
fn scale_bound(unit: AgeUnit, bound_years: f64, bound: Bound) -> f64 {
    let scaled = bound_years * unit.per_year();
    match unit {
        AgeUnit::Years | AgeUnit::Months => scaled,
        AgeUnit::Weeks | AgeUnit::Days => match bound {
            Bound::Lower => scaled.floor(),
            Bound::Upper => scaled.ceil(),
        },
    }
}
