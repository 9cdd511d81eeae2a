use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use wardtrack_data::models::patient::{CreatePatientRecord, PatientUpdate};
use wardtrack_data::repository::{PatientRepositoryTrait, RepositoryError};

use crate::entities::conversions::{self, ConversionError};
use crate::entities::patient::{CreatePatientRequest, Patient, UpdatePatientRequest};

/// Patient service errors
#[derive(Debug, Error)]
pub enum PatientServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Patient not found: {0}")]
    NotFound(Uuid),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for PatientServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => PatientServiceError::Validation(msg),
            other => PatientServiceError::Repository(other.to_string()),
        }
    }
}

impl From<ConversionError> for PatientServiceError {
    fn from(err: ConversionError) -> Self {
        PatientServiceError::Repository(err.to_string())
    }
}

/// Collect validator errors into one message
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for patient CRUD operations
#[async_trait]
pub trait PatientServiceTrait {
    /// Register a new patient; the condition flag starts false
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientServiceError>;

    /// Get all registered patients
    async fn get_all_patients(&self) -> Result<Vec<Patient>, PatientServiceError>;

    /// Get a patient by ID
    async fn get_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError>;

    /// Get all patients currently in critical condition
    async fn get_critical_patients(&self) -> Result<Vec<Patient>, PatientServiceError>;

    /// Apply a partial demographics update
    async fn update_patient(&self, id: Uuid, request: UpdatePatientRequest) -> Result<Patient, PatientServiceError>;

    /// Delete a patient, returning the deleted record
    async fn delete_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError>;
}

/// Patient service over a patient repository
pub struct PatientService<R: PatientRepositoryTrait> {
    repository: R,
}

impl<R: PatientRepositoryTrait> PatientService<R> {
    /// Create a new patient service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: PatientRepositoryTrait + Send + Sync> PatientServiceTrait for PatientService<R> {
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientServiceError> {
        request
            .validate()
            .map_err(|e| PatientServiceError::Validation(validation_message(&e)))?;

        let record = self
            .repository
            .create(CreatePatientRecord {
                name: request.name,
                age: request.age,
                gender: request.gender,
            })
            .await?;

        info!("Registered patient {}", record.id);
        Ok(conversions::patient_from_record(record)?)
    }

    async fn get_all_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        let records = self.repository.get_all().await?;
        records
            .into_iter()
            .map(|r| conversions::patient_from_record(r).map_err(Into::into))
            .collect()
    }

    async fn get_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError> {
        let record = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(PatientServiceError::NotFound(id))?;

        Ok(conversions::patient_from_record(record)?)
    }

    async fn get_critical_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        let records = self.repository.get_critical().await?;
        records
            .into_iter()
            .map(|r| conversions::patient_from_record(r).map_err(Into::into))
            .collect()
    }

    async fn update_patient(&self, id: Uuid, request: UpdatePatientRequest) -> Result<Patient, PatientServiceError> {
        request
            .validate()
            .map_err(|e| PatientServiceError::Validation(validation_message(&e)))?;

        let update = PatientUpdate {
            name: request.name,
            age: request.age,
            gender: request.gender,
        };

        let record = self
            .repository
            .update(id, update)
            .await?
            .ok_or(PatientServiceError::NotFound(id))?;

        info!("Updated patient {}", record.id);
        Ok(conversions::patient_from_record(record)?)
    }

    async fn delete_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError> {
        let record = self
            .repository
            .delete(id)
            .await?
            .ok_or(PatientServiceError::NotFound(id))?;

        info!("Deleted patient {}", record.id);
        Ok(conversions::patient_from_record(record)?)
    }
}
