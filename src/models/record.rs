//! Clinical encounter record model
//!
//! This module contains the `ClinicalRecord` model, the read-only input of
//! every engine computation. Records are supplied by the persistence
//! collaborator already scoped to a user and program year; the engine
//! never mutates them and never fetches data itself.
//!
//! Most fields are nullable and most categorical fields are open
//! vocabularies: the engine passes unseen values through instead of
//! validating against a closed enum.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::details::EncounterDetails;
use crate::models::types::AgeUnit;

/// A single clinical encounter logged by a resident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalRecord {
    /// Opaque record identifier
    pub id: String,
    /// Encounter date; records without one are excluded from
    /// date-dependent computations
    pub date: Option<NaiveDate>,
    /// Patient age in `age_unit` units
    pub age: Option<f64>,
    /// Unit the age value is expressed in; an unrecognized unit string
    /// deserializes to `None` and the age is treated as missing
    #[serde(deserialize_with = "lenient_age_unit")]
    pub age_unit: Option<AgeUnit>,
    /// Patient sex
    pub sex: Option<String>,
    /// Consultation type code
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    /// Care location the encounter happened at
    pub location: Option<String>,
    /// Supervision autonomy level during the encounter
    pub autonomy: Option<String>,
    /// Smoker status
    pub smoker_status: Option<String>,
    /// Raw in-person flag; see `PresentialState::from_flag`
    pub presential: Option<bool>,
    /// Whether the vaccination plan is up to date
    pub vaccination_plan: Option<bool>,
    /// Alcohol consumption flag
    pub alcohol: Option<bool>,
    /// Drug consumption flag
    pub drugs: Option<bool>,
    /// Household family type
    pub family_type: Option<String>,
    /// Patient school level
    pub school_level: Option<String>,
    /// Patient professional situation
    pub professional_situation: Option<String>,
    /// Resident's program year when the encounter was logged
    pub program_year: Option<u8>,
    /// Nested detail fields
    pub details: EncounterDetails,
}

fn lenient_age_unit<'de, D>(deserializer: D) -> Result<Option<AgeUnit>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(AgeUnit::parse))
}

impl ClinicalRecord {
    /// Patient age normalized to years, when both age and unit are present
    #[must_use]
    pub fn age_in_years(&self) -> Option<f64> {
        match (self.age, self.age_unit) {
            (Some(age), Some(unit)) => Some(unit.to_years(age)),
            _ => None,
        }
    }

    /// Canonical rotation key for urgency and internship grouping
    #[must_use]
    pub fn internship_key(&self) -> Option<String> {
        self.details
            .internship
            .as_deref()
            .map(crate::utils::fold_key)
            .filter(|key| !key.is_empty())
    }
}
