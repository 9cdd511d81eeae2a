use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use wardtrack_data::models::test_record::CreateTestRecordRow;
use wardtrack_data::repository::{PatientRepositoryTrait, RepositoryError, TestRecordRepositoryTrait};

use crate::entities::conversions::{self, ConversionError};
use crate::entities::test_record::{CreateTestRecordRequest, PatientHistory, TestRecord};
use super::classification;

/// Vitals service errors
#[derive(Debug, Error)]
pub enum VitalsServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),

    /// The test was stored but the patient's condition flag could not be
    /// refreshed afterwards
    #[error("Test {test_id} stored but condition refresh failed: {message}")]
    ConditionRefresh { test_id: Uuid, message: String },
}

impl From<RepositoryError> for VitalsServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => VitalsServiceError::Validation(msg),
            other => VitalsServiceError::Repository(other.to_string()),
        }
    }
}

impl From<ConversionError> for VitalsServiceError {
    fn from(err: ConversionError) -> Self {
        VitalsServiceError::Repository(err.to_string())
    }
}

/// Trait for vital-sign test operations, including the condition updater
#[async_trait]
pub trait VitalsServiceTrait {
    /// Record a test for a patient, then synchronously re-derive the
    /// patient's critical condition flag before returning
    async fn record_test(
        &self,
        patient_id: Uuid,
        request: CreateTestRecordRequest,
    ) -> Result<TestRecord, VitalsServiceError>;

    /// Get all tests for a patient, newest first
    async fn get_tests(&self, patient_id: Uuid) -> Result<Vec<TestRecord>, VitalsServiceError>;

    /// Get a patient's demographics plus all recorded tests
    async fn get_history(&self, patient_id: Uuid) -> Result<PatientHistory, VitalsServiceError>;

    /// Re-derive the critical condition flag from the most recent test.
    /// Returns the persisted verdict, or `None` when the patient has no
    /// tests and the flag was left unchanged. Idempotent.
    async fn refresh_critical_condition(&self, patient_id: Uuid) -> Result<Option<bool>, VitalsServiceError>;
}

/// Vitals service over the patient and test record repositories
pub struct VitalsService<P, T>
where
    P: PatientRepositoryTrait,
    T: TestRecordRepositoryTrait,
{
    patients: P,
    tests: T,
}

impl<P, T> VitalsService<P, T>
where
    P: PatientRepositoryTrait,
    T: TestRecordRepositoryTrait,
{
    /// Create a new vitals service
    pub fn new(patients: P, tests: T) -> Self {
        Self { patients, tests }
    }
}

#[async_trait]
impl<P, T> VitalsServiceTrait for VitalsService<P, T>
where
    P: PatientRepositoryTrait + Send + Sync,
    T: TestRecordRepositoryTrait + Send + Sync,
{
    async fn record_test(
        &self,
        patient_id: Uuid,
        request: CreateTestRecordRequest,
    ) -> Result<TestRecord, VitalsServiceError> {
        // Reject tests for unknown patients up front; storage itself keeps
        // only a weak reference
        if self.patients.get_by_id(patient_id).await?.is_none() {
            return Err(VitalsServiceError::PatientNotFound(patient_id));
        }

        classification::validate_value(request.kind, &request.value)
            .map_err(VitalsServiceError::Validation)?;

        let recorded_at = request.recorded_at.unwrap_or_else(Utc::now);

        let row = self
            .tests
            .create(CreateTestRecordRow {
                patient_id: patient_id.to_string(),
                kind: request.kind.as_str().to_string(),
                value: request.value,
                recorded_at: recorded_at.to_rfc3339(),
            })
            .await?;

        let test = conversions::test_from_row(row)?;
        info!("Recorded {} test {} for patient {}", test.kind, test.id, patient_id);

        // The test is durably stored at this point; a refresh failure leaves
        // the flag stale and must surface to the caller
        if let Err(e) = self.refresh_critical_condition(patient_id).await {
            warn!(
                "Test {} stored but condition refresh for patient {} failed: {}",
                test.id, patient_id, e
            );
            return Err(VitalsServiceError::ConditionRefresh {
                test_id: test.id,
                message: e.to_string(),
            });
        }

        Ok(test)
    }

    async fn get_tests(&self, patient_id: Uuid) -> Result<Vec<TestRecord>, VitalsServiceError> {
        let rows = self.tests.list_by_patient(patient_id, None).await?;
        rows.into_iter()
            .map(|r| conversions::test_from_row(r).map_err(Into::into))
            .collect()
    }

    async fn get_history(&self, patient_id: Uuid) -> Result<PatientHistory, VitalsServiceError> {
        let record = self
            .patients
            .get_by_id(patient_id)
            .await?
            .ok_or(VitalsServiceError::PatientNotFound(patient_id))?;

        let patient = conversions::patient_from_record(record)?;
        let tests = self.get_tests(patient_id).await?;

        Ok(PatientHistory { patient, tests })
    }

    async fn refresh_critical_condition(&self, patient_id: Uuid) -> Result<Option<bool>, VitalsServiceError> {
        let Some(row) = self.tests.latest_for_patient(patient_id).await? else {
            // No tests yet: the flag stays at its current value
            return Ok(None);
        };

        let latest = conversions::test_from_row(row)?;
        let critical = classification::is_critical(latest.kind, &latest.value);

        self.patients
            .set_critical_condition(patient_id, critical)
            .await?
            .ok_or(VitalsServiceError::PatientNotFound(patient_id))?;

        info!(
            "Patient {} critical condition set to {} from {} test {}",
            patient_id, critical, latest.kind, latest.id
        );

        Ok(Some(critical))
    }
}
