use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::database::get_db_pool;
use crate::models::test_record::{CreateTestRecordRow, TestRecordRow};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
#[cfg(feature = "sqlite")]
use super::storage::DatabaseStorage;

/// Repository trait for the test record collection
#[async_trait]
pub trait TestRecordRepositoryTrait {
    /// Store a new test record; records are immutable once stored
    async fn create(&self, request: CreateTestRecordRow) -> Result<TestRecordRow, RepositoryError>;

    /// Get a patient's test records, newest first, optionally limited
    async fn list_by_patient(&self, patient_id: Uuid, limit: Option<usize>) -> Result<Vec<TestRecordRow>, RepositoryError>;

    /// Get the single most recent test record for a patient
    async fn latest_for_patient(&self, patient_id: Uuid) -> Result<Option<TestRecordRow>, RepositoryError>;
}

/// Repository for test records.
/// Uses the SQLite pool when one was initialized, shared in-memory storage
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct TestRecordRepository {
    /// In-memory storage for when the database is not available
    storage: InMemoryStorage,
}

impl TestRecordRepository {
    /// Create a new repository with its own in-memory fallback
    pub fn new() -> Self {
        Self { storage: InMemoryStorage::new() }
    }

    /// Create a repository over an existing storage handle
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TestRecordRepositoryTrait for TestRecordRepository {
    async fn create(&self, request: CreateTestRecordRow) -> Result<TestRecordRow, RepositoryError> {
        let test = TestRecordRow {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            kind: request.kind,
            value: request.value,
            recorded_at: request.recorded_at,
        };

        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => {
                DatabaseStorage::store_test(&pool, &test).await?;
                Ok(test)
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.store_test(&test).await
            }
        }
    }

    async fn list_by_patient(&self, patient_id: Uuid, limit: Option<usize>) -> Result<Vec<TestRecordRow>, RepositoryError> {
        match get_db_pool() {
            #[cfg(feature = "sqlite")]
            Ok(pool) => DatabaseStorage::tests_by_patient(&pool, &patient_id.to_string(), limit).await,
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                self.storage.tests_by_patient(&patient_id.to_string(), limit).await
            }
        }
    }

    async fn latest_for_patient(&self, patient_id: Uuid) -> Result<Option<TestRecordRow>, RepositoryError> {
        let mut tests = self.list_by_patient(patient_id, Some(1)).await?;
        Ok(if tests.is_empty() { None } else { Some(tests.remove(0)) })
    }
}
