//! Health check route

use axum::{extract::State, Json};

use crate::models::{DatabaseHealth, HealthResponse};
use crate::state::AppState;

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.as_secs(),
        database: DatabaseHealth {
            connected: true,
            path: state.db.path().display().to_string(),
            size_bytes: state.db.size_bytes(),
        },
    })
}
