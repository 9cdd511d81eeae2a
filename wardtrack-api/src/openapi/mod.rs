use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Patient endpoints
        crate::api::handlers::patients::create_patient,
        crate::api::handlers::patients::list_patients,
        crate::api::handlers::patients::list_critical_patients,
        crate::api::handlers::patients::get_patient,
        crate::api::handlers::patients::update_patient,
        crate::api::handlers::patients::delete_patient,

        // Test record endpoints
        crate::api::handlers::test_records::create_test_record,
        crate::api::handlers::test_records::list_test_records,
        crate::api::handlers::test_records::get_patient_history,
    ),
    components(
        schemas(
            // Entities
            crate::entities::patient::Patient,
            crate::entities::patient::CreatePatientRequest,
            crate::entities::patient::UpdatePatientRequest,
            crate::entities::test_record::TestRecord,
            crate::entities::test_record::CreateTestRecordRequest,
            crate::entities::test_record::PatientHistory,
            crate::entities::common::ErrorResponse,
            crate::entities::common::PatientDeleteConfirmation,

            // Domain schemas
            wardtrack_domain::entities::VitalKind,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "patients", description = "Patient management endpoints"),
        (name = "tests", description = "Vital-sign test endpoints"),
    ),
    info(
        title = "WardTrack API",
        version = "0.1.0",
        description = "API for managing patient clinical data for healthcare providers",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
