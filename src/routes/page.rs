//! Server-rendered landing page.
//!
//! Form posts run a flow and redirect back to the page, so a refresh never
//! re-submits. Only `/` starts over: it mints a new session with empty state
//! on every load.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::domain::SoilForm;
use crate::error::{ApiError, ApiResult};
use crate::flows;
use crate::middleware::RequestIdExt;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestForm {
    pub question: String,
}

/// 303 back to the session's page.
///
/// Without client-side script the page has to live at a URL that carries its
/// session, so refreshing `/sessions/:id` shows the same result and chat
/// again. Returning to `/` is what resets the page; the header links there.
fn back_to(session_id: Uuid, anchor: &str) -> Redirect {
    Redirect::to(&format!("/sessions/{session_id}#{anchor}"))
}

/// GET / - every load starts a fresh page session
pub async fn landing(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let session_id = state.sessions.create();
    tracing::debug!(%session_id, "Opened page session");

    let page = state
        .sessions
        .snapshot(session_id)
        .ok_or_else(ApiError::session_not_found)?;
    Ok(Html(state.templates.render_page(session_id, &page)?))
}

/// GET /sessions/:session_id
pub async fn show(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Html<String>> {
    let page = state
        .sessions
        .snapshot(session_id)
        .ok_or_else(ApiError::session_not_found)?;
    Ok(Html(state.templates.render_page(session_id, &page)?))
}

/// POST /sessions/:session_id/predict
pub async fn predict(
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Form(form): Form<SoilForm>,
) -> ApiResult<Redirect> {
    flows::submit_sample(&state, session_id, form, headers.request_id()).await?;
    Ok(back_to(session_id, "predict"))
}

/// POST /sessions/:session_id/guide
pub async fn guide(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Redirect> {
    flows::request_guide(&state, session_id).await?;
    Ok(back_to(session_id, "predict"))
}

/// POST /sessions/:session_id/chat
pub async fn chat(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> ApiResult<Redirect> {
    flows::send_message(&state, session_id, &form.message)?;
    Ok(back_to(session_id, "ai-assistant"))
}

/// POST /sessions/:session_id/chat/suggest
pub async fn suggest(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<SuggestForm>,
) -> ApiResult<Redirect> {
    flows::suggest_question(&state, session_id, &form.question)?;
    Ok(back_to(session_id, "ai-assistant"))
}
