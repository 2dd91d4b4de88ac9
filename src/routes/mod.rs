pub mod health;
pub mod page;
pub mod sessions;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Server-rendered page and its form targets
pub fn page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(page::landing))
        .route("/health", get(health::health_check))
        .route("/sessions/:session_id", get(page::show))
        .route("/sessions/:session_id/predict", post(page::predict))
        .route("/sessions/:session_id/guide", post(page::guide))
        .route("/sessions/:session_id/chat", post(page::chat))
        .route("/sessions/:session_id/chat/suggest", post(page::suggest))
}

/// JSON API, nested under /api
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/:session_id", get(sessions::get_session))
        .route(
            "/sessions/:session_id/prediction",
            post(sessions::submit_prediction),
        )
        .route("/sessions/:session_id/guide", post(sessions::generate_guide))
        .route("/sessions/:session_id/chat", post(sessions::send_chat))
        .route(
            "/sessions/:session_id/chat/suggest",
            post(sessions::suggest_question),
        )
}
