// GET handlers: version, api/report, api/cpu

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::AppState;
use crate::version::{NAME, VERSION};

fn not_ready() -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "error": "no poll cycle has completed yet" })),
    )
        .into_response()
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/report returns the per-device report of the latest cycle.
pub(super) async fn report_handler(State(state): State<AppState>) -> axum::response::Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(&snapshot.report).into_response(),
        None => not_ready(),
    }
}

/// GET /api/cpu returns the CPU samples of the latest completed window.
pub(super) async fn cpu_handler(State(state): State<AppState>) -> axum::response::Response {
    match state.latest.read().await.as_ref() {
        Some(snapshot) => Json(serde_json::json!({
            "device": snapshot.cpu_device,
            "timestamp": snapshot.timestamp,
            "samples": snapshot.cpu,
        }))
        .into_response(),
        None => not_ready(),
    }
}
