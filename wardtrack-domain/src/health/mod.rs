//! Health checks and system status

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use wardtrack_data::database::get_db_pool;

/// Overall or per-component status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    /// Everything operational
    Ok,
    /// Running with reduced functionality (e.g. in-memory storage only)
    Degraded,
}

/// Health of one system component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: SystemStatus,
    /// Optional detail message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregated system health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Overall status: the worst component status
    pub status: SystemStatus,
    /// Persistence layer status
    pub database: ComponentHealth,
}

/// Trait for health reporting
#[async_trait]
pub trait HealthServiceTrait {
    /// Check the health of the system's components
    async fn check(&self) -> SystemHealth;
}

/// Default health service backed by the real database pool
#[derive(Debug, Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Create a new health service
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn check(&self) -> SystemHealth {
        let database = match get_db_pool() {
            Ok(_) => ComponentHealth { status: SystemStatus::Ok, message: None },
            Err(e) => ComponentHealth {
                status: SystemStatus::Degraded,
                message: Some(format!("{} - falling back to in-memory storage", e)),
            },
        };

        SystemHealth { status: database.status, database }
    }
}
