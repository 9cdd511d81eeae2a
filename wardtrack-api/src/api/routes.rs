use axum::{
    routing::get,
    Extension, Router,
};
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::api::handlers::{health, patients, test_records};
use crate::api::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router over the default services
pub async fn create_app() -> Router {
    debug!("Creating application router");

    let state = AppState::default_services();
    create_app_with_state(state)
}

/// Create the application router over explicit services; used by tests to
/// inject mocks
pub fn create_app_with_state(state: AppState) -> Router {
    // Create health service using factory function
    let health_service = health::create_health_service();

    // Define the fixed /patients/critical route before the parametrized
    // /patients/:id routes to avoid conflicts
    let api_routes = Router::new()
        .route("/patients", get(patients::list_patients).post(patients::create_patient))
        .route("/patients/critical", get(patients::list_critical_patients))
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .patch(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/patients/:id/tests",
            get(test_records::list_test_records).post(test_records::create_test_record),
        )
        .route("/patients/:id/history", get(test_records::get_patient_history));

    debug!("API routes configured");

    // Public routes outside the /api prefix
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check uptime reporting
    health::initialize_server_start_time();

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = configure_swagger_routes();
    app.merge(swagger)
}
