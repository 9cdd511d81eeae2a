use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use wardtrack_domain::entities::VitalKind;

use super::patient::Patient;

/// Public representation of a vital-sign test record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestRecord {
    /// Unique identifier for the test
    pub id: Uuid,

    /// Identifier of the patient the test belongs to
    pub patient_id: Uuid,

    /// Which vital sign was measured
    pub kind: VitalKind,

    /// Measured value; "systolic/diastolic" for blood pressure, a plain
    /// number for the other kinds
    pub value: String,

    /// When the reading was taken
    pub recorded_at: DateTime<Utc>,
}

/// Request payload for recording a new vital-sign test
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTestRecordRequest {
    /// Which vital sign was measured, e.g. "Blood Pressure". Labels outside
    /// the known set are rejected with 400 rather than silently classified
    /// as non-critical.
    #[schema(example = "Blood Pressure")]
    pub kind: String,

    /// Measured value
    pub value: String,

    /// When the reading was taken. Defaults to the submission time.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A patient's demographics plus all recorded tests, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientHistory {
    /// The patient record
    pub patient: Patient,

    /// All tests for the patient, ordered by recording time descending
    pub tests: Vec<TestRecord>,
}
