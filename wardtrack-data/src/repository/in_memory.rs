use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::patient::{PatientRecord, PatientUpdate};
use crate::models::test_record::TestRecordRow;
use super::errors::RepositoryError;

/// In-memory storage for both collections
///
/// Clones share the underlying maps, so the patient and test repositories
/// constructed from one handle observe the same state. Used when the
/// database pool was never initialized, and by unit tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    patients: Arc<Mutex<HashMap<String, PatientRecord>>>,
    tests: Arc<Mutex<HashMap<String, TestRecordRow>>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a patient record
    pub async fn store_patient(&self, patient: &PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.insert(patient.id.clone(), patient.clone());
        Ok(patient.clone())
    }

    /// Get all patient records
    pub async fn get_all_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let mut patients: Vec<PatientRecord> = store.values().cloned().collect();
        patients.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(patients)
    }

    /// Get a patient record by ID
    pub async fn get_patient(&self, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        let store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.get(id).cloned())
    }

    /// Get all patients currently flagged as critical
    pub async fn get_critical_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let mut patients: Vec<PatientRecord> = store
            .values()
            .filter(|p| p.critical_condition)
            .cloned()
            .collect();
        patients.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(patients)
    }

    /// Apply a partial update to a patient record
    pub async fn update_patient(
        &self,
        id: &str,
        update: &PatientUpdate,
        updated_at: &str,
    ) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let Some(patient) = store.get_mut(id) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            patient.name = name.clone();
        }
        if let Some(age) = update.age {
            patient.age = age;
        }
        if let Some(gender) = &update.gender {
            patient.gender = gender.clone();
        }
        patient.updated_at = updated_at.to_string();

        Ok(Some(patient.clone()))
    }

    /// Set only the critical condition flag on a patient record
    pub async fn set_critical_condition(
        &self,
        id: &str,
        critical: bool,
        updated_at: &str,
    ) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        let Some(patient) = store.get_mut(id) else {
            return Ok(None);
        };

        patient.critical_condition = critical;
        patient.updated_at = updated_at.to_string();

        Ok(Some(patient.clone()))
    }

    /// Delete a patient record, returning it when it existed
    pub async fn delete_patient(&self, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut store = self.patients.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.remove(id))
    }

    /// Store a test record
    pub async fn store_test(&self, test: &TestRecordRow) -> Result<TestRecordRow, RepositoryError> {
        let mut store = self.tests.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.insert(test.id.clone(), test.clone());
        Ok(test.clone())
    }

    /// Get a patient's test records ordered by recording time descending
    pub async fn tests_by_patient(
        &self,
        patient_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TestRecordRow>, RepositoryError> {
        let store = self.tests.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;

        let mut tests: Vec<TestRecordRow> = store
            .values()
            .filter(|t| t.patient_id == patient_id)
            .cloned()
            .collect();
        tests.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        if let Some(limit) = limit {
            tests.truncate(limit);
        }

        Ok(tests)
    }
}
