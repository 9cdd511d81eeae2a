// Repository module structure
pub mod errors;
mod in_memory;
mod patients;
#[cfg(feature = "sqlite")]
mod storage;
mod test_records;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use patients::{PatientRepository, PatientRepositoryTrait};
pub use test_records::{TestRecordRepository, TestRecordRepositoryTrait};
