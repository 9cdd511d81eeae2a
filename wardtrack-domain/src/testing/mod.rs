// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::patient::{CreatePatientRequest, Patient, UpdatePatientRequest};
use crate::entities::test_record::{CreateTestRecordRequest, PatientHistory, TestRecord};
use crate::services::classification;
use crate::services::patients::{validation_message, PatientServiceError, PatientServiceTrait};
use crate::services::vitals::{VitalsServiceError, VitalsServiceTrait};

/// Mock implementation of the PatientServiceTrait for handler tests
#[derive(Default)]
pub struct MockPatientService {
    patients: RwLock<HashMap<Uuid, Patient>>,
    should_fail: bool,
}

impl MockPatientService {
    /// Create a new mock patient service
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail every operation with a repository error
    pub fn with_repository_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Add a pre-defined patient to the mock
    pub fn with_patient(self, patient: Patient) -> Self {
        {
            let mut patients = self.patients.write().unwrap();
            patients.insert(patient.id, patient);
        }
        self
    }

    fn check_failure(&self) -> Result<(), PatientServiceError> {
        if self.should_fail {
            Err(PatientServiceError::Repository("simulated repository failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PatientServiceTrait for MockPatientService {
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientServiceError> {
        self.check_failure()?;
        request
            .validate()
            .map_err(|e| PatientServiceError::Validation(validation_message(&e)))?;

        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: request.name,
            age: request.age,
            gender: request.gender,
            critical_condition: false,
            created_at: now,
            updated_at: now,
        };

        let mut patients = self.patients.write().unwrap();
        patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn get_all_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        self.check_failure()?;
        let patients = self.patients.read().unwrap();
        let mut all: Vec<Patient> = patients.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn get_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError> {
        self.check_failure()?;
        let patients = self.patients.read().unwrap();
        patients.get(&id).cloned().ok_or(PatientServiceError::NotFound(id))
    }

    async fn get_critical_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        self.check_failure()?;
        let patients = self.patients.read().unwrap();
        let mut critical: Vec<Patient> = patients
            .values()
            .filter(|p| p.critical_condition)
            .cloned()
            .collect();
        critical.sort_by_key(|p| p.created_at);
        Ok(critical)
    }

    async fn update_patient(&self, id: Uuid, request: UpdatePatientRequest) -> Result<Patient, PatientServiceError> {
        self.check_failure()?;
        request
            .validate()
            .map_err(|e| PatientServiceError::Validation(validation_message(&e)))?;

        let mut patients = self.patients.write().unwrap();
        let patient = patients.get_mut(&id).ok_or(PatientServiceError::NotFound(id))?;

        if let Some(name) = request.name {
            patient.name = name;
        }
        if let Some(age) = request.age {
            patient.age = age;
        }
        if let Some(gender) = request.gender {
            patient.gender = gender;
        }
        patient.updated_at = Utc::now();

        Ok(patient.clone())
    }

    async fn delete_patient(&self, id: Uuid) -> Result<Patient, PatientServiceError> {
        self.check_failure()?;
        let mut patients = self.patients.write().unwrap();
        patients.remove(&id).ok_or(PatientServiceError::NotFound(id))
    }
}

/// Mock implementation of the VitalsServiceTrait for handler tests.
///
/// Shares a `MockPatientService` so recorded tests actually flip the
/// patient's condition flag through the real classifier.
pub struct MockVitalsService {
    patients: Arc<MockPatientService>,
    tests: RwLock<HashMap<Uuid, Vec<TestRecord>>>,
    should_fail: bool,
}

impl MockVitalsService {
    /// Create a new mock vitals service over a shared mock patient service
    pub fn new(patients: Arc<MockPatientService>) -> Self {
        Self {
            patients,
            tests: RwLock::new(HashMap::new()),
            should_fail: false,
        }
    }

    /// Configure the mock to fail every operation with a repository error
    pub fn with_repository_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Add a pre-defined test record to the mock
    pub fn with_test(self, test: TestRecord) -> Self {
        {
            let mut tests = self.tests.write().unwrap();
            tests.entry(test.patient_id).or_default().push(test);
        }
        self
    }
}

#[async_trait]
impl VitalsServiceTrait for MockVitalsService {
    async fn record_test(
        &self,
        patient_id: Uuid,
        request: CreateTestRecordRequest,
    ) -> Result<TestRecord, VitalsServiceError> {
        if self.should_fail {
            return Err(VitalsServiceError::Repository("simulated repository failure".to_string()));
        }

        if self.patients.get_patient(patient_id).await.is_err() {
            return Err(VitalsServiceError::PatientNotFound(patient_id));
        }

        classification::validate_value(request.kind, &request.value)
            .map_err(VitalsServiceError::Validation)?;

        let test = TestRecord {
            id: Uuid::new_v4(),
            patient_id,
            kind: request.kind,
            value: request.value,
            recorded_at: request.recorded_at.unwrap_or_else(Utc::now),
        };

        {
            let mut tests = self.tests.write().unwrap();
            tests.entry(patient_id).or_default().push(test.clone());
        }

        self.refresh_critical_condition(patient_id).await?;
        Ok(test)
    }

    async fn get_tests(&self, patient_id: Uuid) -> Result<Vec<TestRecord>, VitalsServiceError> {
        if self.should_fail {
            return Err(VitalsServiceError::Repository("simulated repository failure".to_string()));
        }

        let tests = self.tests.read().unwrap();
        let mut result = tests.get(&patient_id).cloned().unwrap_or_default();
        result.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(result)
    }

    async fn get_history(&self, patient_id: Uuid) -> Result<PatientHistory, VitalsServiceError> {
        let patient = self
            .patients
            .get_patient(patient_id)
            .await
            .map_err(|_| VitalsServiceError::PatientNotFound(patient_id))?;
        let tests = self.get_tests(patient_id).await?;
        Ok(PatientHistory { patient, tests })
    }

    async fn refresh_critical_condition(&self, patient_id: Uuid) -> Result<Option<bool>, VitalsServiceError> {
        let latest = self.get_tests(patient_id).await?.into_iter().next();
        let Some(latest) = latest else {
            return Ok(None);
        };

        let critical = classification::is_critical(latest.kind, &latest.value);

        let mut patients = self.patients.patients.write().unwrap();
        let patient = patients
            .get_mut(&patient_id)
            .ok_or(VitalsServiceError::PatientNotFound(patient_id))?;
        patient.critical_condition = critical;
        patient.updated_at = Utc::now();

        Ok(Some(critical))
    }
}

/// Build a linked pair of mock services sharing one patient map
pub fn mock_services() -> (Arc<MockPatientService>, Arc<MockVitalsService>) {
    let patients = Arc::new(MockPatientService::new());
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    (patients, vitals)
}
