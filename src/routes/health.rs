use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub prediction_service: String,
    pub guide_api: String,
    pub sessions: usize,
}

/// Health check endpoint. The page itself is up even when the outbound
/// services are not, so this always answers 200.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let prediction_ok = state.prediction_client.health_check().await.is_ok();
    let guide_ok = state.settings.guide_configured();

    let status = if prediction_ok && guide_ok {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                prediction_service: if prediction_ok { "ok" } else { "error" }.to_string(),
                guide_api: if guide_ok { "configured" } else { "missing_key" }.to_string(),
                sessions: state.sessions.len(),
            },
        }),
    )
}
