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
use wardtrack_domain::testing::{MockPatientService, MockVitalsService};

use crate::api::routes::create_app_with_state;
use crate::api::AppState;

fn app_with_patient() -> (axum::Router, Uuid) {
    let now = Utc::now();
    let patient = Patient {
        id: Uuid::new_v4(),
        name: "John Doe".to_string(),
        age: 30,
        gender: "Male".to_string(),
        critical_condition: false,
        created_at: now,
        updated_at: now,
    };

    let patients = Arc::new(MockPatientService::new().with_patient(patient.clone()));
    let vitals = Arc::new(MockVitalsService::new(patients.clone()));
    let app = create_app_with_state(AppState { patients, vitals });
    (app, patient.id)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_test(patient_id: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/patients/{}/tests", patient_id))
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn recording_a_test_returns_201_and_flags_critical_patients() {
    let (app, patient_id) = app_with_patient();

    let response = app
        .clone()
        .oneshot(post_test(patient_id, json!({"kind": "Blood Pressure", "value": "200/80"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["kind"], "Blood Pressure");
    assert_eq!(body["value"], "200/80");
    assert_eq!(body["patient_id"], patient_id.to_string());

    // The condition updater ran before the response was returned
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}", patient_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["critical_condition"], true);
}

#[tokio::test]
async fn normal_reading_leaves_the_flag_false() {
    let (app, patient_id) = app_with_patient();

    let response = app
        .clone()
        .oneshot(post_test(patient_id, json!({"kind": "Respiratory Rate", "value": "18"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}", patient_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["critical_condition"], false);
}

#[tokio::test]
async fn unknown_vital_kind_is_rejected_with_400() {
    let (app, patient_id) = app_with_patient();

    let response = app
        .oneshot(post_test(patient_id, json!({"kind": "Body Temperature", "value": "38.5"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undeserializable_body_is_rejected_with_400() {
    let (app, patient_id) = app_with_patient();

    // Missing the required "value" field
    let response = app
        .oneshot(post_test(patient_id, json!({"kind": "Blood Pressure"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn malformed_value_is_rejected_with_400() {
    let (app, patient_id) = app_with_patient();

    let response = app
        .oneshot(post_test(patient_id, json!({"kind": "Blood Pressure", "value": "120-80"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn recording_for_unknown_patient_returns_404() {
    let (app, _) = app_with_patient();

    let response = app
        .oneshot(post_test(Uuid::new_v4(), json!({"kind": "Heartbeat Rate", "value": "72"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_tests_round_trips_kind_value_and_patient() {
    let (app, patient_id) = app_with_patient();

    for (kind, value) in [("Heartbeat Rate", "72"), ("Blood Oxygen Level", "97")] {
        let response = app
            .clone()
            .oneshot(post_test(patient_id, json!({"kind": kind, "value": value})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}/tests", patient_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let tests = body.as_array().unwrap();
    assert_eq!(tests.len(), 2);
    for test in tests {
        assert_eq!(test["patient_id"], patient_id.to_string());
        assert!(test.get("kind").is_some() && test.get("value").is_some());
    }
}

#[tokio::test]
async fn history_returns_patient_and_tests_or_404() {
    let (app, patient_id) = app_with_patient();

    app.clone()
        .oneshot(post_test(patient_id, json!({"kind": "Heartbeat Rate", "value": "110"})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}/history", patient_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["patient"]["id"], patient_id.to_string());
    assert_eq!(body["patient"]["critical_condition"], true);
    assert_eq!(body["tests"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}/history", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
