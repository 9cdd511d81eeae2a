use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patient::Patient;

/// The vital signs the system tracks
///
/// Wire names match the clinical labels clients submit ("Blood Pressure",
/// "Respiratory Rate", ...). The enum is closed: unknown labels are rejected
/// at deserialization instead of being silently classified as non-critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(utoipa::ToSchema))]
pub enum VitalKind {
    /// Arterial pressure, value encoded as "systolic/diastolic"
    #[serde(rename = "Blood Pressure")]
    BloodPressure,

    /// Breaths per minute
    #[serde(rename = "Respiratory Rate")]
    RespiratoryRate,

    /// Oxygen saturation percentage
    #[serde(rename = "Blood Oxygen Level")]
    BloodOxygenLevel,

    /// Beats per minute
    #[serde(rename = "Heartbeat Rate")]
    HeartbeatRate,
}

impl VitalKind {
    /// The wire/storage label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "Blood Pressure",
            VitalKind::RespiratoryRate => "Respiratory Rate",
            VitalKind::BloodOxygenLevel => "Blood Oxygen Level",
            VitalKind::HeartbeatRate => "Heartbeat Rate",
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Blood Pressure" => Ok(VitalKind::BloodPressure),
            "Respiratory Rate" => Ok(VitalKind::RespiratoryRate),
            "Blood Oxygen Level" => Ok(VitalKind::BloodOxygenLevel),
            "Heartbeat Rate" => Ok(VitalKind::HeartbeatRate),
            other => Err(format!("Unknown vital kind: {}", other)),
        }
    }
}

/// One vital-sign measurement tied to a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Unique identifier for the test
    pub id: Uuid,

    /// Identifier of the patient the test belongs to. Weak reference: the
    /// patient may have been deleted since.
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
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestRecordRequest {
    /// Which vital sign was measured
    pub kind: VitalKind,

    /// Measured value
    pub value: String,

    /// When the reading was taken. Defaults to the insertion time.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A patient's complete history: demographics plus all recorded tests,
/// newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientHistory {
    /// The patient record
    pub patient: Patient,

    /// All tests for the patient, ordered by recording time descending
    pub tests: Vec<TestRecord>,
}
