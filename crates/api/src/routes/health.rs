//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    pub settings_cache: CacheHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheHealth {
    pub entries: usize,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn ping_database(state: &AppState) -> Option<u64> {
    let start = std::time::Instant::now();
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .ok()
        .map(|_| start.elapsed().as_millis() as u64)
}

/// Full health check: database connectivity and settings cache size.
///
/// Responds 503 with the same body when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let latency_ms = ping_database(&state).await;
    let connected = latency_ms.is_some();

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            connected,
            latency_ms,
        },
        settings_cache: CacheHealth {
            entries: state.settings.cached_len(),
        },
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Liveness probe: 200 while the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe: 200 once the database answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    match ping_database(&state).await {
        Some(_) => Ok(Json(StatusResponse {
            status: "ready".to_string(),
        })),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
