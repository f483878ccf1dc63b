//! Shared builders for integration tests

use chrono::NaiveDate;
use encounter_analytics::models::EncounterDetails;
use encounter_analytics::{AgeUnit, ClinicalRecord};

/// Initialize logging once for tests that want output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A unit consultation on the given date
#[must_use]
pub fn unit_record(id: &str, date: (i32, u32, u32), record_type: &str) -> ClinicalRecord {
    ClinicalRecord {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        location: Some("unit".to_string()),
        record_type: Some(record_type.to_string()),
        autonomy: Some("partial".to_string()),
        presential: Some(true),
        age: Some(40.0),
        age_unit: Some(AgeUnit::Years),
        ..ClinicalRecord::default()
    }
}

/// An urgent-care encounter under the given rotation
#[must_use]
pub fn urgent_record(id: &str, date: (i32, u32, u32), internship: &str) -> ClinicalRecord {
    ClinicalRecord {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        location: Some("urgent-care".to_string()),
        autonomy: Some("shoulder-to-shoulder".to_string()),
        details: EncounterDetails {
            internship: Some(internship.to_string()),
            ..EncounterDetails::default()
        },
        ..ClinicalRecord::default()
    }
}

/// A complementary-training encounter under the given rotation
#[must_use]
pub fn complementary_record(id: &str, date: (i32, u32, u32), internship: &str) -> ClinicalRecord {
    ClinicalRecord {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        location: Some("complementary".to_string()),
        details: EncounterDetails {
            internship: Some(internship.to_string()),
            ..EncounterDetails::default()
        },
        ..ClinicalRecord::default()
    }
}
