//! Common domain type definitions
//!
//! This module contains the enum types shared across the engine: the age
//! unit vocabulary with its year-normalization factors, the presential
//! state derived from the raw boolean flag, and the residency program year
//! that selects a report pipeline.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Months in a year, for age normalization
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Weeks in a year, for age normalization
pub const WEEKS_PER_YEAR: f64 = 52.1429;
/// Days in a year, accounting for leap years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Unit an encounter age value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    /// Age in whole or fractional years
    Years,
    /// Age in months
    Months,
    /// Age in weeks
    Weeks,
    /// Age in days
    Days,
}

impl AgeUnit {
    /// Parse a loose unit string; anything outside the four known units is
    /// `None` and the caller treats the age as missing.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "years" | "year" | "y" => Some(Self::Years),
            "months" | "month" | "m" => Some(Self::Months),
            "weeks" | "week" | "w" => Some(Self::Weeks),
            "days" | "day" | "d" => Some(Self::Days),
            _ => None,
        }
    }

    /// Canonical key for this unit, as stored on records
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
        }
    }

    /// Number of this unit per year
    #[must_use]
    pub const fn per_year(self) -> f64 {
        match self {
            Self::Years => 1.0,
            Self::Months => MONTHS_PER_YEAR,
            Self::Weeks => WEEKS_PER_YEAR,
            Self::Days => DAYS_PER_YEAR,
        }
    }

    /// Convert an age expressed in this unit to years
    #[must_use]
    pub fn to_years(self, age: f64) -> f64 {
        age / self.per_year()
    }

    /// All recognized units
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Years, Self::Months, Self::Weeks, Self::Days]
    }
}

/// Whether an encounter happened in person or remotely
///
/// Derived from the raw `presential` flag: only an explicit `true` maps to
/// `Presential`; `false` and absent both map to `Remote`. This default is a
/// domain rule the regulatory reports depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentialState {
    /// In-person encounter
    Presential,
    /// Remote encounter, or no flag recorded
    Remote,
}

impl PresentialState {
    /// Derive the state from the raw record flag
    #[must_use]
    pub fn from_flag(flag: Option<bool>) -> Self {
        if flag == Some(true) {
            Self::Presential
        } else {
            Self::Remote
        }
    }

    /// Canonical key for this state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Presential => "presential",
            Self::Remote => "remote",
        }
    }
}

/// Residency program year, driving which report pipeline applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramYear {
    /// First residency year
    One,
    /// Second residency year
    Two,
    /// Third residency year
    Three,
    /// Fourth residency year
    Four,
}

impl ProgramYear {
    /// Numeric year (1 through 4)
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for ProgramYear {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(EngineError::UnknownReport(other)),
        }
    }
}
