//! Conversions between storage models and domain entities
//!
//! Storage rows carry string ids, kinds and timestamps; decoding failures
//! surface as errors rather than silently substituting defaults, since a row
//! that fails here was corrupted after it left the service layer.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use wardtrack_data::models::patient::PatientRecord;
use wardtrack_data::models::test_record::TestRecordRow;

use super::patient::Patient;
use super::test_record::{TestRecord, VitalKind};

/// Error decoding a storage row into a domain entity
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Identifier was not a valid UUID
    #[error("Invalid identifier '{0}'")]
    InvalidId(String),

    /// Timestamp was not valid RFC 3339
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Stored vital kind label was not recognized
    #[error("Invalid vital kind '{0}'")]
    InvalidKind(String),
}

fn parse_id(raw: &str) -> Result<Uuid, ConversionError> {
    Uuid::parse_str(raw).map_err(|_| ConversionError::InvalidId(raw.to_string()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConversionError::InvalidTimestamp(raw.to_string()))
}

/// Decode a stored patient row
pub fn patient_from_record(record: PatientRecord) -> Result<Patient, ConversionError> {
    Ok(Patient {
        id: parse_id(&record.id)?,
        name: record.name,
        age: record.age,
        gender: record.gender,
        critical_condition: record.critical_condition,
        created_at: parse_timestamp(&record.created_at)?,
        updated_at: parse_timestamp(&record.updated_at)?,
    })
}

/// Decode a stored test record row
pub fn test_from_row(row: TestRecordRow) -> Result<TestRecord, ConversionError> {
    let kind: VitalKind = row
        .kind
        .parse()
        .map_err(|_| ConversionError::InvalidKind(row.kind.clone()))?;

    Ok(TestRecord {
        id: parse_id(&row.id)?,
        patient_id: parse_id(&row.patient_id)?,
        kind,
        value: row.value,
        recorded_at: parse_timestamp(&row.recorded_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_rows() {
        let row = TestRecordRow {
            id: "9f4d1db0-9a69-4c3a-b8f5-0d6a1f1f2a3b".to_string(),
            patient_id: "5e0b44a6-9f49-45f2-8a57-35f2b9d1c111".to_string(),
            kind: "Blood Pressure".to_string(),
            value: "120/80".to_string(),
            recorded_at: "2024-03-15T08:30:00Z".to_string(),
        };

        let test = test_from_row(row).unwrap();
        assert_eq!(test.kind, VitalKind::BloodPressure);
        assert_eq!(test.value, "120/80");
    }

    #[test]
    fn rejects_unknown_kind_labels() {
        let row = TestRecordRow {
            id: "9f4d1db0-9a69-4c3a-b8f5-0d6a1f1f2a3b".to_string(),
            patient_id: "5e0b44a6-9f49-45f2-8a57-35f2b9d1c111".to_string(),
            kind: "Body Temperature".to_string(),
            value: "38.5".to_string(),
            recorded_at: "2024-03-15T08:30:00Z".to_string(),
        };

        assert!(matches!(test_from_row(row), Err(ConversionError::InvalidKind(_))));
    }
}
