//! End-to-end tests against the full router with the real services.
//!
//! The database pool is never initialized here, so the repositories run on
//! their shared in-memory storage; each `create_application` call gets a
//! fresh state.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use wardtrack_api::api::create_application;

// Initialize tracing once for all tests
static INIT: std::sync::Once = std::sync::Once::new();
fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn register_patient(app: &axum::Router, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/patients",
            json!({"name": name, "age": 30, "gender": "Male"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_reports_status() {
    initialize();
    let app = create_application().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.get("status").is_some());
    assert!(body.get("version").is_some());
    assert!(body.get("database").is_some());
}

#[tokio::test]
async fn critical_blood_pressure_scenario() {
    initialize();
    let app = create_application().await;

    // Create patient {name: "John Doe", age: 30, gender: "Male"} -> 201
    let id = register_patient(&app, "John Doe").await;

    // Submit a 200/80 blood pressure test -> 201 (200 > 180 is critical)
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/patients/{}/tests", id),
            json!({"kind": "Blood Pressure", "value": "200/80"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let test = body_json(response).await;
    assert_eq!(test["kind"], "Blood Pressure");
    assert_eq!(test["value"], "200/80");
    assert_eq!(test["patient_id"], id);

    // The patient now shows critical_condition = true
    let response = app
        .oneshot(get(&format!("/api/patients/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patient = body_json(response).await;
    assert_eq!(patient["critical_condition"], true);
}

#[tokio::test]
async fn normal_respiratory_rate_keeps_flag_false() {
    initialize();
    let app = create_application().await;
    let id = register_patient(&app, "Alice Smith").await;

    // 18 is within [12, 30]
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/patients/{}/tests", id),
            json!({"kind": "Respiratory Rate", "value": "18"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get(&format!("/api/patients/{}", id))).await.unwrap();
    let patient = body_json(response).await;
    assert_eq!(patient["critical_condition"], false);
}

#[tokio::test]
async fn critical_listing_returns_exactly_the_critical_patient() {
    initialize();
    let app = create_application().await;

    let critical_id = register_patient(&app, "John Doe").await;
    let stable_id = register_patient(&app, "Alice Smith").await;

    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/patients/{}/tests", critical_id),
            json!({"kind": "Blood Pressure", "value": "200/80"}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/patients/{}/tests", stable_id),
            json!({"kind": "Respiratory Rate", "value": "18"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/patients/critical")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], critical_id);
}

#[tokio::test]
async fn unknown_patient_returns_404() {
    initialize();
    let app = create_application().await;

    let response = app
        .oneshot(get("/api/patients/7f9cb2a4-8f42-4f2b-9f3e-111111111111"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("could not be found"));
}

#[tokio::test]
async fn tests_round_trip_through_listing() {
    initialize();
    let app = create_application().await;
    let id = register_patient(&app, "Bob Jones").await;

    for (kind, value) in [
        ("Heartbeat Rate", "72"),
        ("Blood Oxygen Level", "97"),
        ("Blood Pressure", "130/85"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/patients/{}/tests", id),
                json!({"kind": kind, "value": value}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get(&format!("/api/patients/{}/tests", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let tests = body.as_array().unwrap();
    assert_eq!(tests.len(), 3);
    for test in tests {
        assert_eq!(test["patient_id"], id);
    }

    // Most recent submission first
    assert_eq!(tests[0]["kind"], "Blood Pressure");
    assert_eq!(tests[0]["value"], "130/85");

    // History combines the patient with the same test list
    let response = app
        .oneshot(get(&format!("/api/patients/{}/history", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    assert_eq!(history["patient"]["id"], id);
    assert_eq!(history["tests"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn update_and_delete_lifecycle() {
    initialize();
    let app = create_application().await;
    let id = register_patient(&app, "Carol White").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/patients/{}", id),
            json!({"age": 31}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patient = body_json(response).await;
    assert_eq!(patient["age"], 31);
    assert_eq!(patient["name"], "Carol White");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/patients/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Patient deleted successfully");

    let response = app.oneshot(get(&format!("/api/patients/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn swagger_document_is_served() {
    initialize();
    let app = create_application().await;

    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"].get("/api/patients").is_some());
    assert!(body["paths"].get("/api/patients/{id}/tests").is_some());
}
