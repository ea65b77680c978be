//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Health check response structure.
///
/// Provides information about the application's health status
/// and various system components.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00.000Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        },
        "cache": {
            "status": "healthy",
            "message": "redis up",
            "response_time_ms": 1
        }
    }
}))]
pub struct HealthResponse {
    /// Overall health status
    #[schema(example = "healthy")]
    pub status: HealthStatus,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Timestamp of the health check (ISO 8601 format)
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T12:00:00.000Z")]
    pub timestamp: String,
    /// Detailed checks for various components
    pub checks: HashMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some non-critical issues
    Degraded,
    /// Critical issues present
    Unhealthy,
}

impl HealthStatus {
    /// The more severe of two statuses.
    pub fn worst(self, other: HealthStatus) -> HealthStatus {
        use HealthStatus::*;
        match (self, other) {
            (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
            (Degraded, _) | (_, Degraded) => Degraded,
            _ => Healthy,
        }
    }
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "message": "Connected",
    "response_time_ms": 5
}))]
pub struct ComponentHealth {
    /// Component status
    #[schema(example = "healthy")]
    pub status: HealthStatus,
    /// Optional message with details
    #[schema(example = "Connected")]
    pub message: Option<String>,
    /// Response time in milliseconds
    #[schema(example = 5)]
    pub response_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::Healthy).unwrap();
        assert_eq!(json, "\"healthy\"");
    }

    #[test]
    fn test_worst_status() {
        use HealthStatus::*;
        assert_eq!(Healthy.worst(Healthy), Healthy);
        assert_eq!(Healthy.worst(Degraded), Degraded);
        assert_eq!(Degraded.worst(Unhealthy), Unhealthy);
        assert_eq!(Unhealthy.worst(Healthy), Unhealthy);
    }

    #[test]
    fn test_health_response_shape() {
        let mut checks = HashMap::new();
        checks.insert(
            "cache".to_string(),
            ComponentHealth {
                status: HealthStatus::Degraded,
                message: Some("redis down".to_string()),
                response_time_ms: Some(5),
            },
        );

        let response = HealthResponse {
            status: HealthStatus::Degraded,
            version: "0.1.0".to_string(),
            timestamp: "2024-01-01T12:00:00Z".to_string(),
            checks,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"]["cache"]["message"], "redis down");
    }
}
