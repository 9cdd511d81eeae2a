pub mod classification;
pub mod patients;
pub mod vitals;

// Domain services
// This module contains business logic implementations.

pub use patients::{PatientService, PatientServiceError, PatientServiceTrait};
pub use vitals::{VitalsService, VitalsServiceError, VitalsServiceTrait};

use wardtrack_data::repository::{InMemoryStorage, PatientRepository, TestRecordRepository};

/// Create the default patient and vitals services.
///
/// Both services share one storage handle so that, when the database pool is
/// absent and the repositories fall back to memory, they still observe the
/// same state.
pub fn create_default_services() -> (
    PatientService<PatientRepository>,
    VitalsService<PatientRepository, TestRecordRepository>,
) {
    let storage = InMemoryStorage::new();
    let patients = PatientRepository::with_storage(storage.clone());
    let tests = TestRecordRepository::with_storage(storage);

    (
        PatientService::new(patients.clone()),
        VitalsService::new(patients, tests),
    )
}
