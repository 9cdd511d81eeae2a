// Public entities for the WardTrack API
// This module contains data structures that cross the application boundary

// Patient DTOs
pub mod patient;

// Test record DTOs
pub mod test_record;

// Common entities for error handling
pub mod common;
