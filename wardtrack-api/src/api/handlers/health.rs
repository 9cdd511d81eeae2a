use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use wardtrack_domain::health::{HealthServiceTrait, SystemStatus};

/// Health check response model
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok" or "degraded")
    pub status: String,
    /// Current application version from the Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Persistence layer status
    pub database: ComponentHealthStatus,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok" or "degraded")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Service handle for dependency injection
pub type HealthServiceHandle = Arc<dyn HealthServiceTrait + Send + Sync>;

/// Create the default health service for the handlers to use
pub fn create_health_service() -> HealthServiceHandle {
    Arc::new(wardtrack_domain::health::HealthService::new())
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

/// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let _ = SERVER_START_TIME.set(start_time);
    });
}

fn status_label(status: SystemStatus) -> String {
    match status {
        SystemStatus::Ok => "ok".to_string(),
        SystemStatus::Degraded => "degraded".to_string(),
    }
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
    ),
    tag = "health"
)]
#[instrument(skip(health_service))]
pub async fn health_check(
    Extension(health_service): Extension<HealthServiceHandle>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let uptime = SERVER_START_TIME.get().map(|start| now.saturating_sub(*start));

    let health = health_service.check().await;

    let response = HealthResponse {
        status: status_label(health.status),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        database: ComponentHealthStatus {
            status: status_label(health.database.status),
            message: health.database.message,
        },
    };

    (StatusCode::OK, Json(response))
}
