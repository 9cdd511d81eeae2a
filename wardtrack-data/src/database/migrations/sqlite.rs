use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_patients_table(conn)?;
    create_test_records_table(conn)?;
    create_test_records_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the patients table
fn create_patients_table(conn: &Connection) -> Result<(), String> {
    info!("Creating patients table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS patients (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL,
            critical_condition INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create the test records table
///
/// patient_id is a weak reference: no foreign key constraint, matching the
/// document-store semantics the service layer assumes.
fn create_test_records_table(conn: &Connection) -> Result<(), String> {
    info!("Creating test_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS test_records (
            id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            value TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index for the "most recent tests for a patient" query
fn create_test_records_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on (patient_id, recorded_at)");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_test_records_patient_recorded
        ON test_records (patient_id, recorded_at DESC)",
        [],
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
