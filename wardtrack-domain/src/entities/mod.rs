// Domain entities
pub mod conversions;
pub mod patient;
pub mod test_record;

pub use patient::{CreatePatientRequest, Patient, UpdatePatientRequest};
pub use test_record::{CreateTestRecordRequest, PatientHistory, TestRecord, VitalKind};
