//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Catalog**: At least one villa can be listed
/// 2. **Notifier**: Which sender is active
/// 3. **Sessions**: Number of stored booking sessions
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "catalog": { "status": "ok", "message": "3 villas" },
///     "notifier": { "status": "ok", "message": "email, timeout 15s" },
///     "sessions": { "status": "ok", "message": "12 active" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let catalog = check_catalog(&state).await;
    let notifier = check_notifier(&state);
    let sessions = check_sessions(&state).await;

    let all_healthy = catalog.is_ok() && notifier.is_ok() && sessions.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            catalog,
            notifier,
            sessions,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// An empty catalog makes the booking flow unusable.
async fn check_catalog(state: &AppState) -> CheckStatus {
    match state.villa_service.list().await {
        Ok(villas) if villas.is_empty() => CheckStatus::error("Catalog is empty"),
        Ok(villas) => CheckStatus::ok(format!("{} villas", villas.len())),
        Err(e) => CheckStatus::error(format!("Catalog error: {}", e)),
    }
}

fn check_notifier(state: &AppState) -> CheckStatus {
    let service = &state.reservation_service;
    CheckStatus::ok(format!(
        "{}, timeout {}s",
        service.sender_kind(),
        service.timeout().as_secs()
    ))
}

async fn check_sessions(state: &AppState) -> CheckStatus {
    let active = state.booking_service.sessions().len().await;
    CheckStatus::ok(format!("{} active", active))
}
