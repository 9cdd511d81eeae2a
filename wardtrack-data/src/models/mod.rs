// Storage models for the two persisted collections
pub mod patient;
pub mod test_record;
