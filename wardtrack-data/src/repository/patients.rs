use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::database::get_db_pool;
use crate::models::patient::{CreatePatientRecord, PatientRecord, PatientUpdate};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
#[cfg(feature = "sqlite")]
use super::storage::DatabaseStorage;

/// Repository trait for the patient collection
#[async_trait]
pub trait PatientRepositoryTrait {
    /// Register a new patient; the flag starts false
    async fn create(&self, request: CreatePatientRecord) -> Result<PatientRecord, RepositoryError>;

    /// Get all patients
    async fn get_all(&self) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Get a patient by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Get all patients currently flagged as critical
    async fn get_critical(&self) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Apply a partial demographics update; `None` when the patient is absent
    async fn update(&self, id: Uuid, update: PatientUpdate) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Persist the derived critical condition flag, touching nothing else
    async fn set_critical_condition(&self, id: Uuid, critical: bool) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Delete a patient, returning the deleted record when it existed
    async fn delete(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError>;
}

/// Repository for patient records.
/// Uses the SQLite pool when one was initialized, shared in-memory storage
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct PatientRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl PatientRepository {
    /// Create a new repository with its own in-memory fallback
    pub fn new() -> Self {
        Self { storage: InMemoryStorage::new() }
    }

    /// Create a repository over an existing storage handle, so that several
    /// repositories share one fallback state
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn create(&self, request: CreatePatientRecord) -> Result<PatientRecord, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let patient = PatientRecord {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            age: request.age,
            gender: request.gender,
            critical_condition: false,
            created_at: now.clone(),
            updated_at: now,
        };

        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => {
                DatabaseStorage::store_patient(&pool, &patient).await?;
                Ok(patient)
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_patient(&patient).await
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::get_all_patients(&pool).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.get_all_patients().await
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError> {
        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::get_patient(&pool, &id.to_string()).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.get_patient(&id.to_string()).await
            }
        }
    }

    async fn get_critical(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::get_critical_patients(&pool).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.get_critical_patients().await
            }
        }
    }

    async fn update(&self, id: Uuid, update: PatientUpdate) -> Result<Option<PatientRecord>, RepositoryError> {
        let updated_at = Utc::now().to_rfc3339();

        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::update_patient(&pool, &id.to_string(), &update, &updated_at).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.update_patient(&id.to_string(), &update, &updated_at).await
            }
        }
    }

    async fn set_critical_condition(&self, id: Uuid, critical: bool) -> Result<Option<PatientRecord>, RepositoryError> {
        let updated_at = Utc::now().to_rfc3339();

        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => {
                DatabaseStorage::set_critical_condition(&pool, &id.to_string(), critical, &updated_at).await
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.set_critical_condition(&id.to_string(), critical, &updated_at).await
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<PatientRecord>, RepositoryError> {
        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::delete_patient(&pool, &id.to_string()).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.delete_patient(&id.to_string()).await
            }
        }
    }
}
