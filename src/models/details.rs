//! Typed encounter detail bag
//!
//! Legacy encounter payloads carry a loosely-typed `details` mapping whose
//! values drifted over the years: booleans stored as strings, single codes
//! stored where arrays were expected, and fields that are a string on some
//! records and a boolean on others. This module types every known detail
//! field explicitly so the shape ambiguities are handled in one place, and
//! keeps an unknown-key fallback bucket so foreign keys survive a round
//! trip instead of being dropped.

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// A detail value whose legacy encoding may be a string or a boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    /// Boolean encoding (older records)
    Bool(bool),
    /// String encoding
    Text(String),
}

impl DetailValue {
    /// The string payload, when this value is a string
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Whether this value is the boolean `true`
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

/// Nested detail fields recorded per encounter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncounterDetails {
    /// Whether the patient belongs to the resident's own patient list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_list: Option<bool>,
    /// Contraceptive in use; boolean on some legacy records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraceptive: Option<DetailValue>,
    /// Newly prescribed contraceptive; string or boolean
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_contraceptive: Option<DetailValue>,
    /// Coded diagnoses; elements may be comma- or semicolon-joined
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnosis: Vec<String>,
    /// Coded problems addressed during the encounter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
    /// Coded diagnoses newly made at this encounter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub new_diagnosis: Vec<String>,
    /// Referral categories issued at this encounter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referral: Vec<String>,
    /// Referral motive codes, shared across all categories on the record
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referral_motive: Vec<String>,
    /// Rotation placement the encounter belongs to; matched case-insensitively
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internship: Option<String>,
    /// Keys outside the known detail vocabulary
    #[serde(flatten)]
    pub unknown: LinkedHashMap<String, serde_json::Value>,
}
