use serde::{Deserialize, Serialize};

/// Storage model for a vital-sign test record
///
/// The kind is stored as its wire string ("Blood Pressure" etc.); the domain
/// layer parses it back into its closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecordRow {
    /// Unique identifier for the test
    pub id: String,

    /// Identifier of the patient the test belongs to (weak reference)
    pub patient_id: String,

    /// Vital sign kind, e.g. "Blood Pressure"
    pub kind: String,

    /// Measured value; "systolic/diastolic" for blood pressure, a plain
    /// number for the other kinds
    pub value: String,

    /// When the reading was taken (RFC 3339)
    pub recorded_at: String,
}

/// Input data for storing a new test record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestRecordRow {
    /// Identifier of the patient the test belongs to
    pub patient_id: String,

    /// Vital sign kind
    pub kind: String,

    /// Measured value
    pub value: String,

    /// When the reading was taken (RFC 3339)
    pub recorded_at: String,
}
