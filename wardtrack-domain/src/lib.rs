// WardTrack domain
// This crate contains the business logic for the WardTrack application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the database module from wardtrack-data for convenience
pub use wardtrack_data::database;

// Testing utilities - only available with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
