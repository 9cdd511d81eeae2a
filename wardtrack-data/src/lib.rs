// WardTrack data layer
// This crate handles persistence for the patient and test record collections

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
