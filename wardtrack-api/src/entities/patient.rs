use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public representation of a patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Unique identifier for the patient
    pub id: Uuid,

    /// Full name of the patient
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Gender as free-form text
    pub gender: String,

    /// Whether the patient's latest vital-sign test breached a safe
    /// threshold. Derived by the server, never accepted from clients.
    pub critical_condition: bool,

    /// When the patient was registered
    pub created_at: DateTime<Utc>,

    /// When the patient was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request payload for registering a new patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePatientRequest {
    /// Full name of the patient
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    /// Age in years
    #[validate(range(max = 150, message = "Age must be at most 150"))]
    pub age: u32,

    /// Gender as free-form text
    #[validate(length(min = 1, max = 50, message = "Gender must be between 1 and 50 characters"))]
    pub gender: String,
}

/// Request payload for a partial patient update. Omitted fields keep their
/// current value; the critical condition flag cannot be set through this.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePatientRequest {
    /// New name, if changing
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,

    /// New age, if changing
    #[validate(range(max = 150, message = "Age must be at most 150"))]
    pub age: Option<u32>,

    /// New gender, if changing
    #[validate(length(min = 1, max = 50, message = "Gender must be between 1 and 50 characters"))]
    pub gender: Option<String>,
}
