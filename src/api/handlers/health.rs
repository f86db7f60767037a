//! Health check handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub catalog_entries: usize,
    pub event_queue: &'static str,
}

/// Reports service liveness.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns 200 with component states, or 503 when the database does not
/// respond.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    let response = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" },
        database: if database_ok { "ok" } else { "unreachable" },
        catalog_entries: state.catalog.len(),
        event_queue: if state.event_tx.is_closed() {
            "closed"
        } else {
            "open"
        },
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
