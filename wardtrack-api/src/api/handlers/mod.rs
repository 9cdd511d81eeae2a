pub mod health;
pub mod patients;
pub mod test_records;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use patients::{
    create_patient, delete_patient, get_patient, list_critical_patients, list_patients,
    update_patient,
};
pub use test_records::{create_test_record, get_patient_history, list_test_records};
