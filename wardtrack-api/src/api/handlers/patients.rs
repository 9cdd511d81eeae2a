use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use wardtrack_domain::entities::patient::Patient as DomainPatient;
use wardtrack_domain::services::PatientServiceError;

use crate::api::AppState;
use crate::entities::common::{ApiJson, DeleteConfirmation, ErrorResponse, PatientDeleteConfirmation};
use crate::entities::patient::{CreatePatientRequest, Patient, UpdatePatientRequest};

/// Convert a domain patient to its public representation
pub(crate) fn to_public_patient(patient: DomainPatient) -> Patient {
    Patient {
        id: patient.id,
        name: patient.name,
        age: patient.age,
        gender: patient.gender,
        critical_condition: patient.critical_condition,
        created_at: patient.created_at,
        updated_at: patient.updated_at,
    }
}

/// Map a patient service error to an HTTP response
fn map_error(err: PatientServiceError) -> Response {
    match err {
        PatientServiceError::Validation(msg) => {
            warn!("Patient request failed validation: {}", msg);
            ErrorResponse::validation_error(&msg).into_response()
        }
        PatientServiceError::NotFound(id) => {
            info!("Patient not found: {}", id);
            ErrorResponse::not_found("patient").into_response()
        }
        PatientServiceError::Repository(msg) => {
            error!("Patient store error: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state, request))]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePatientRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Registering new patient");

    let domain_request = wardtrack_domain::entities::CreatePatientRequest {
        name: request.name,
        age: request.age,
        gender: request.gender,
    };

    match state.patients.create_patient(domain_request).await {
        Ok(patient) => {
            info!("Patient registered with ID: {}", patient.id);
            Ok((StatusCode::CREATED, Json(to_public_patient(patient))))
        }
        Err(e) => Err(map_error(e)),
    }
}

/// List all registered patients
#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "All registered patients", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Response> {
    match state.patients.get_all_patients().await {
        Ok(patients) => {
            let public: Vec<Patient> = patients.into_iter().map(to_public_patient).collect();
            Ok((StatusCode::OK, Json(public)))
        }
        Err(e) => Err(map_error(e)),
    }
}

/// List all patients currently in critical condition
#[utoipa::path(
    get,
    path = "/api/patients/critical",
    responses(
        (status = 200, description = "Patients in critical condition", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn list_critical_patients(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Response> {
    match state.patients.get_critical_patients().await {
        Ok(patients) => {
            let public: Vec<Patient> = patients.into_iter().map(to_public_patient).collect();
            Ok((StatusCode::OK, Json(public)))
        }
        Err(e) => Err(map_error(e)),
    }
}

/// Get a single patient by ID
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(
        ("id" = Uuid, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.patients.get_patient(id).await {
        Ok(patient) => Ok((StatusCode::OK, Json(to_public_patient(patient)))),
        Err(e) => Err(map_error(e)),
    }
}

/// Partially update a patient's demographics
#[utoipa::path(
    patch,
    path = "/api/patients/{id}",
    params(
        ("id" = Uuid, Path, description = "Patient ID")
    ),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state, request))]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdatePatientRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating patient {}", id);

    let domain_request = wardtrack_domain::entities::UpdatePatientRequest {
        name: request.name,
        age: request.age,
        gender: request.gender,
    };

    match state.patients.update_patient(id, domain_request).await {
        Ok(patient) => Ok((StatusCode::OK, Json(to_public_patient(patient)))),
        Err(e) => Err(map_error(e)),
    }
}

/// Delete a patient by ID
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(
        ("id" = Uuid, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = PatientDeleteConfirmation),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(state))]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.patients.delete_patient(id).await {
        Ok(patient) => {
            info!("Patient deleted: {}", id);
            Ok((
                StatusCode::OK,
                Json(DeleteConfirmation {
                    message: "Patient deleted successfully".to_string(),
                    deleted: to_public_patient(patient),
                }),
            ))
        }
        Err(e) => Err(map_error(e)),
    }
}
