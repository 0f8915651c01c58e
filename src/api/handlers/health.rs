//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with store checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Link storage reachable. `status` is `degraded` when the
///   counter store is down, since identifiers then come from the random path.
/// - **503 Service Unavailable**: Link storage unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Link storage reachable" },
///     "counter": { "status": "ok", "message": "Counter 'link_counter' reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let counter = check_counter(&state).await;

    let status = match (storage.is_ok(), counter.is_ok()) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    };
    let storage_ok = storage.is_ok();

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { storage, counter },
    };

    if storage_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    if state.link_service.storage_healthy().await {
        CheckStatus::ok("Link storage reachable")
    } else {
        CheckStatus::error("Link storage unreachable")
    }
}

/// A missing counter store is reported as ok, since that setup is intentional.
async fn check_counter(state: &AppState) -> CheckStatus {
    let allocator = state.link_service.allocator();

    if !allocator.has_store() {
        return CheckStatus::ok("No counter store; identifiers are random");
    }

    if allocator.health_check().await {
        CheckStatus::ok(format!("Counter '{}' reachable", allocator.counter_key()))
    } else {
        CheckStatus::error(format!(
            "Counter '{}' unreachable; issuing random identifiers",
            allocator.counter_key()
        ))
    }
}
