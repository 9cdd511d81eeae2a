use tracing::debug;

use crate::database::DatabasePool;
use crate::models::patient::{PatientRecord, PatientUpdate};
use crate::models::test_record::TestRecordRow;
use super::errors::RepositoryError;

/// Database storage operations for the patient and test record collections
pub struct DatabaseStorage;

#[cfg(feature = "sqlite")]
fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<PatientRecord, rusqlite::Error> {
    Ok(PatientRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get::<_, i64>(2)? as u32,
        gender: row.get(3)?,
        critical_condition: row.get::<_, i64>(4)? != 0,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

#[cfg(feature = "sqlite")]
fn test_from_row(row: &rusqlite::Row<'_>) -> Result<TestRecordRow, rusqlite::Error> {
    Ok(TestRecordRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        kind: row.get(2)?,
        value: row.get(3)?,
        recorded_at: row.get(4)?,
    })
}

impl DatabaseStorage {
    /// Store a patient in the database
    #[cfg(feature = "sqlite")]
    pub async fn store_patient(pool: &DatabasePool, patient: &PatientRecord) -> Result<(), RepositoryError> {
        debug!("Storing patient in database: id={}", patient.id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get().map_err(RepositoryError::Pool)?;

                conn.execute(
                    "INSERT INTO patients
                     (id, name, age, gender, critical_condition, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    (
                        &patient.id,
                        &patient.name,
                        patient.age as i64,
                        &patient.gender,
                        patient.critical_condition as i64,
                        &patient.created_at,
                        &patient.updated_at,
                    ),
                ).map_err(RepositoryError::Sqlite)?;

                Ok(())
            }
        }
    }

    /// Get all patients from the database
    #[cfg(feature = "sqlite")]
    pub async fn get_all_patients(pool: &DatabasePool) -> Result<Vec<PatientRecord>, RepositoryError> {
        debug!("Getting all patients from database");

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(
                    "SELECT id, name, age, gender, critical_condition, created_at, updated_at
                     FROM patients ORDER BY created_at",
                )?;

                let rows = stmt.query_map([], |row| patient_from_row(row))?;

                let mut result = Vec::new();
                for patient in rows {
                    result.push(patient?);
                }

                Ok(result)
            }
        }
    }

    /// Get a patient by ID from the database
    #[cfg(feature = "sqlite")]
    pub async fn get_patient(pool: &DatabasePool, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        debug!("Getting patient by ID from database: id={}", id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(
                    "SELECT id, name, age, gender, critical_condition, created_at, updated_at
                     FROM patients WHERE id = ?1",
                )?;

                match stmt.query_row([id], |row| patient_from_row(row)) {
                    Ok(patient) => Ok(Some(patient)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(RepositoryError::Sqlite(e)),
                }
            }
        }
    }

    /// Get all patients flagged as critical
    #[cfg(feature = "sqlite")]
    pub async fn get_critical_patients(pool: &DatabasePool) -> Result<Vec<PatientRecord>, RepositoryError> {
        debug!("Getting critical patients from database");

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut stmt = conn.prepare(
                    "SELECT id, name, age, gender, critical_condition, created_at, updated_at
                     FROM patients WHERE critical_condition = 1 ORDER BY created_at",
                )?;

                let rows = stmt.query_map([], |row| patient_from_row(row))?;

                let mut result = Vec::new();
                for patient in rows {
                    result.push(patient?);
                }

                Ok(result)
            }
        }
    }

    /// Apply a partial update to a patient, returning the updated row
    #[cfg(feature = "sqlite")]
    pub async fn update_patient(
        pool: &DatabasePool,
        id: &str,
        update: &PatientUpdate,
        updated_at: &str,
    ) -> Result<Option<PatientRecord>, RepositoryError> {
        debug!("Updating patient in database: id={}", id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let changed = conn.execute(
                    "UPDATE patients SET
                     name = COALESCE(?2, name),
                     age = COALESCE(?3, age),
                     gender = COALESCE(?4, gender),
                     updated_at = ?5
                     WHERE id = ?1",
                    (
                        id,
                        &update.name,
                        update.age.map(|a| a as i64),
                        &update.gender,
                        updated_at,
                    ),
                )?;

                if changed == 0 {
                    return Ok(None);
                }
            }
        }

        Self::get_patient(pool, id).await
    }

    /// Set only the critical condition flag on a patient
    #[cfg(feature = "sqlite")]
    pub async fn set_critical_condition(
        pool: &DatabasePool,
        id: &str,
        critical: bool,
        updated_at: &str,
    ) -> Result<Option<PatientRecord>, RepositoryError> {
        debug!("Setting critical condition in database: id={} critical={}", id, critical);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let changed = conn.execute(
                    "UPDATE patients SET critical_condition = ?2, updated_at = ?3 WHERE id = ?1",
                    (id, critical as i64, updated_at),
                )?;

                if changed == 0 {
                    return Ok(None);
                }
            }
        }

        Self::get_patient(pool, id).await
    }

    /// Delete a patient, returning the deleted row when it existed
    #[cfg(feature = "sqlite")]
    pub async fn delete_patient(pool: &DatabasePool, id: &str) -> Result<Option<PatientRecord>, RepositoryError> {
        debug!("Deleting patient from database: id={}", id);

        let existing = Self::get_patient(pool, id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                conn.execute("DELETE FROM patients WHERE id = ?1", [id])?;
            }
        }

        Ok(existing)
    }

    /// Store a test record in the database
    #[cfg(feature = "sqlite")]
    pub async fn store_test(pool: &DatabasePool, test: &TestRecordRow) -> Result<(), RepositoryError> {
        debug!("Storing test record in database: id={}", test.id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get().map_err(RepositoryError::Pool)?;

                conn.execute(
                    "INSERT INTO test_records (id, patient_id, kind, value, recorded_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    (
                        &test.id,
                        &test.patient_id,
                        &test.kind,
                        &test.value,
                        &test.recorded_at,
                    ),
                ).map_err(RepositoryError::Sqlite)?;

                Ok(())
            }
        }
    }

    /// Get a patient's test records ordered by recording time descending
    #[cfg(feature = "sqlite")]
    pub async fn tests_by_patient(
        pool: &DatabasePool,
        patient_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TestRecordRow>, RepositoryError> {
        debug!("Getting test records from database: patient_id={}", patient_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                // -1 means no limit in SQLite
                let limit = limit.map(|l| l as i64).unwrap_or(-1);

                let mut stmt = conn.prepare(
                    "SELECT id, patient_id, kind, value, recorded_at
                     FROM test_records WHERE patient_id = ?1
                     ORDER BY recorded_at DESC LIMIT ?2",
                )?;

                let rows = stmt.query_map((patient_id, limit), |row| test_from_row(row))?;

                let mut result = Vec::new();
                for test in rows {
                    result.push(test?);
                }

                Ok(result)
            }
        }
    }
}
