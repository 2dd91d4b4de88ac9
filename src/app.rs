use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{GuideClient, PredictionClient, ResponseSource};
use crate::session::SessionStore;
use crate::view::Templates;

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    pub sessions: SessionStore,
    pub prediction_client: PredictionClient,
    pub guide_client: GuideClient,
    /// Reply source for the assistant chat
    pub responder: Arc<dyn ResponseSource>,
    pub templates: Templates,
}

impl AppState {
    pub fn new(
        settings: Settings,
        prediction_client: PredictionClient,
        guide_client: GuideClient,
        responder: Arc<dyn ResponseSource>,
    ) -> anyhow::Result<Arc<Self>> {
        let sessions = SessionStore::new(settings.session_idle_ttl_seconds, settings.max_sessions);
        let templates = Templates::new()?;

        Ok(Arc::new(Self {
            settings,
            sessions,
            prediction_client,
            guide_client,
            responder,
            templates,
        }))
    }

    /// Build clients from settings.
    pub fn from_settings(
        settings: Settings,
        responder: Arc<dyn ResponseSource>,
    ) -> anyhow::Result<Arc<Self>> {
        let prediction_client = PredictionClient::new(
            &settings.prediction_service_url,
            settings.prediction_timeout_seconds,
        )?;
        let guide_client = GuideClient::new(
            &settings.guide_api_url,
            &settings.guide_model,
            &settings.guide_api_key,
            settings.guide_timeout_seconds,
        )?;

        Self::new(settings, prediction_client, guide_client, responder)
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // DEBUG spans to keep INFO output quiet
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::page_router())
        .nest("/api", routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
