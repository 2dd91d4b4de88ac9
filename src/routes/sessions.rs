//! JSON API over the page flows.
//!
//! Every endpoint answers with the full page snapshot, wrapped in `data`.
//! A flow that is busy (or has nothing to do) leaves the snapshot unchanged.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse};
use crate::app::AppState;
use crate::domain::SoilForm;
use crate::error::{ApiError, ApiResult};
use crate::flows::{self, PageState};
use crate::middleware::RequestIdExt;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub page: PageState,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub question: String,
}

fn view(session_id: Uuid, page: PageState) -> DataResponse<SessionView> {
    DataResponse::new(SessionView { session_id, page })
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Created<DataResponse<SessionView>>> {
    let session_id = state.sessions.create();
    let page = state
        .sessions
        .snapshot(session_id)
        .ok_or_else(ApiError::session_not_found)?;
    Ok(Created(view(session_id, page)))
}

/// GET /api/sessions/:session_id
pub async fn get_session(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<DataResponse<SessionView>> {
    let page = state
        .sessions
        .snapshot(session_id)
        .ok_or_else(ApiError::session_not_found)?;
    Ok(view(session_id, page))
}

/// POST /api/sessions/:session_id/prediction
pub async fn submit_prediction(
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(form): Json<SoilForm>,
) -> ApiResult<DataResponse<SessionView>> {
    let page = flows::submit_sample(&state, session_id, form, headers.request_id()).await?;
    Ok(view(session_id, page))
}

/// POST /api/sessions/:session_id/guide
pub async fn generate_guide(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<DataResponse<SessionView>> {
    let page = flows::request_guide(&state, session_id).await?;
    Ok(view(session_id, page))
}

/// POST /api/sessions/:session_id/chat
pub async fn send_chat(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<DataResponse<SessionView>> {
    let page = flows::send_message(&state, session_id, &req.message)?;
    Ok(view(session_id, page))
}

/// POST /api/sessions/:session_id/chat/suggest
pub async fn suggest_question(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestRequest>,
) -> ApiResult<DataResponse<SessionView>> {
    let page = flows::suggest_question(&state, session_id, &req.question)?;
    Ok(view(session_id, page))
}
