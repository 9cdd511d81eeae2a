use serde::{Deserialize, Serialize};

/// Storage model for a patient record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique identifier for the patient
    pub id: String,

    /// Full name of the patient
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Gender as free-form text
    pub gender: String,

    /// Derived critical condition flag, never supplied by clients
    pub critical_condition: bool,

    /// When the patient was registered (RFC 3339)
    pub created_at: String,

    /// When the patient was last modified (RFC 3339)
    pub updated_at: String,
}

/// Input data for registering a new patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRecord {
    /// Full name of the patient
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Gender as free-form text
    pub gender: String,
}

/// Partial update for a patient record
///
/// Only fields set to `Some` are written; the critical condition flag is
/// updated through a dedicated repository operation instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUpdate {
    /// New name, if changing
    pub name: Option<String>,

    /// New age, if changing
    pub age: Option<u32>,

    /// New gender, if changing
    pub gender: Option<String>,
}

impl PatientUpdate {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }
}
