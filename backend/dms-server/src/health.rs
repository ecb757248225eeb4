use crate::state::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - liveness: if we can respond, we're alive. No
/// dependency checks.
pub async fn liveness() -> Response {
    let health = json!({
        "status": "healthy",
        "service": "dms",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /health/detailed - readiness: verifies storage connectivity.
pub async fn readiness(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "dms",
                "checks": {
                    "database": { "status": "healthy" }
                },
            })),
        )
            .into_response(),
        Err(e) => {
            log::error!("Readiness check failed: database unreachable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "dms",
                    "checks": {
                        "database": { "status": "unhealthy" }
                    },
                })),
            )
                .into_response()
        }
    }
}
