//! Health check endpoint handlers.
//!
//! The database is critical: when it is unreachable the service reports
//! unhealthy. The cache is not: a down backend only degrades the service
//! because every cache operation fails open.

use std::collections::HashMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::cache::{CacheConnection, CacheStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Component report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
///
/// # Example Response
/// ```json
/// {
///   "status": "degraded",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T12:00:00Z",
///   "checks": {
///     "database": { "status": "healthy", "message": "Connected", "response_time_ms": 5 },
///     "cache": { "status": "degraded", "message": "redis: connection refused", "response_time_ms": 1 }
///   }
/// }
/// ```
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state.db_pool).await;
    let cache = check_cache(state.caches.connection()).await;
    let status = database.status.worst(cache.status);

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);
    checks.insert("cache".to_string(), cache);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (code, Json(response))
}

/// Readiness probe endpoint.
///
/// Only the database gates readiness.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state.db_pool).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(pool: &AsyncDbPool) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let start_time = Instant::now();
    let (status, message) = match pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => (HealthStatus::Healthy, "Connected".to_string()),
            Err(e) => (HealthStatus::Unhealthy, format!("Query failed: {}", e)),
        },
        Err(e) => (HealthStatus::Unhealthy, format!("Connection failed: {}", e)),
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: Some(start_time.elapsed().as_millis() as u64),
    }
}

async fn check_cache(connection: &CacheConnection) -> ComponentHealth {
    let start_time = Instant::now();
    let (status, message) = match connection.status().await {
        CacheStatus::Disabled => (HealthStatus::Healthy, "disabled".to_string()),
        CacheStatus::Up { backend } => (HealthStatus::Healthy, format!("{} up", backend)),
        CacheStatus::Down { backend, error } => {
            (HealthStatus::Degraded, format!("{}: {}", backend, error))
        }
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: Some(start_time.elapsed().as_millis() as u64),
    }
}
