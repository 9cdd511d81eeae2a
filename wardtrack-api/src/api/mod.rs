pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;

use wardtrack_domain::services::{create_default_services, PatientServiceTrait, VitalsServiceTrait};

/// Service handles for dependency injection
pub type PatientServiceHandle = Arc<dyn PatientServiceTrait + Send + Sync>;
pub type VitalsServiceHandle = Arc<dyn VitalsServiceTrait + Send + Sync>;

/// Shared application state for the handlers
#[derive(Clone)]
pub struct AppState {
    /// Patient CRUD service
    pub patients: PatientServiceHandle,
    /// Vital-sign test service, including the condition updater
    pub vitals: VitalsServiceHandle,
}

impl AppState {
    /// Build the default state over the real services
    pub fn default_services() -> Self {
        let (patients, vitals) = create_default_services();
        Self {
            patients: Arc::new(patients),
            vitals: Arc::new(vitals),
        }
    }
}

/// Create the application router
pub async fn create_application() -> Router {
    routes::create_app().await
}
