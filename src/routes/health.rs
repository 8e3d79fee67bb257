use axum::{ Json, extract::State, http::StatusCode };
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
}

/// Liveness check; reports 503 when the storage pool does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(HealthData { status: status.as_u16() }))
}
