// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::models::CpuSample;
use crate::worker::SharedSnapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) latest: SharedSnapshot,
    pub(crate) cpu_tx: broadcast::Sender<CpuSample>,
}

pub fn app(latest: SharedSnapshot, cpu_tx: broadcast::Sender<CpuSample>) -> Router {
    let state = AppState { latest, cpu_tx };
    Router::new()
        .route("/", get(|| async { "netman: lab network manager" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/report", get(http::report_handler)) // GET /api/report
        .route("/api/cpu", get(http::cpu_handler)) // GET /api/cpu
        .route("/ws/cpu", get(ws::ws_cpu)) // WS /ws/cpu
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
