use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use wardtrack_domain::entities::patient::Patient;
use wardtrack_domain::testing::{mock_services, MockPatientService, MockVitalsService};

use crate::api::routes::create_app_with_state;
use crate::api::AppState;

fn state_with(patients: Arc<MockPatientService>, vitals: Arc<MockVitalsService>) -> AppState {
    AppState { patients, vitals }
}

fn sample_patient(critical: bool) -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::new_v4(),
        name: "Jane Roe".to_string(),
        age: 52,
        gender: "Female".to_string(),
        critical_condition: critical,
        created_at: now,
        updated_at: now,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_patient_returns_201_with_generated_id() {
    let (patients, vitals) = mock_services();
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/patients",
            json!({"name": "John Doe", "age": 30, "gender": "Male"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body.get("id").is_some());
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["critical_condition"], false);
}

#[tokio::test]
async fn create_patient_rejects_empty_name() {
    let (patients, vitals) = mock_services();
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/patients",
            json!({"name": "", "age": 30, "gender": "Male"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn create_patient_rejects_wrongly_typed_body_with_400() {
    let (patients, vitals) = mock_services();
    let app = create_app_with_state(state_with(patients, vitals));

    // Undeserializable body: age is a string, not a number
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/patients",
            json!({"name": "John Doe", "age": "thirty", "gender": "Male"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn update_patient_rejects_wrongly_typed_body_with_400() {
    let patient = sample_patient(false);
    let patients = Arc::new(MockPatientService::new().with_patient(patient.clone()));
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/patients/{}", patient.id),
            json!({"age": "fifty-three"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_patient_returns_404_with_message() {
    let (patients, vitals) = mock_services();
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("could not be found"));
}

#[tokio::test]
async fn critical_listing_contains_only_flagged_patients() {
    let flagged = sample_patient(true);
    let unflagged = sample_patient(false);
    let patients = Arc::new(
        MockPatientService::new()
            .with_patient(flagged.clone())
            .with_patient(unflagged),
    );
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(Request::builder().uri("/api/patients/critical").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], flagged.id.to_string());
}

#[tokio::test]
async fn update_patient_is_partial() {
    let patient = sample_patient(false);
    let patients = Arc::new(MockPatientService::new().with_patient(patient.clone()));
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/patients/{}", patient.id),
            json!({"age": 53}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["age"], 53);
    assert_eq!(body["name"], "Jane Roe");
}

#[tokio::test]
async fn delete_patient_returns_confirmation() {
    let patient = sample_patient(false);
    let patients = Arc::new(MockPatientService::new().with_patient(patient.clone()));
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/patients/{}", patient.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Patient deleted successfully");
    assert_eq!(body["deleted"]["id"], patient.id.to_string());
}

#[tokio::test]
async fn repository_failure_maps_to_500_without_leaking_details() {
    let patients = Arc::new(MockPatientService::new().with_repository_failure());
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(state_with(patients, vitals));

    let response = app
        .oneshot(Request::builder().uri("/api/patients").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
    assert!(!body["message"].as_str().unwrap().contains("simulated"));
}
