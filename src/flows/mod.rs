//! Request/response flows of the landing page.
//!
//! State transitions live in [`PredictionFlow`] and [`AssistantFlow`]; the
//! functions here drive them against the outbound services. The session lock
//! is only taken around transitions, never across a network call.

pub mod assistant;
pub mod prediction;

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, Instrument};
use uuid::Uuid;

pub use assistant::AssistantFlow;
pub use prediction::{GuideTicket, PredictionFlow, PredictionTicket};

use crate::app::AppState;
use crate::domain::guide::build_prompt;
use crate::domain::SoilForm;
use crate::error::{ApiError, ApiResult};

/// Everything one page load shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageState {
    pub prediction: PredictionFlow,
    pub assistant: AssistantFlow,
}

fn snapshot(state: &AppState, session_id: Uuid) -> ApiResult<PageState> {
    state
        .sessions
        .snapshot(session_id)
        .ok_or_else(ApiError::session_not_found)
}

/// Submit the form to the prediction service and record the result.
///
/// The call and its closing transition run on their own task, so a client
/// that disconnects mid-request neither aborts the call nor leaves the flow
/// stuck loading.
#[instrument(skip(state, form, request_id))]
pub async fn submit_sample(
    state: &Arc<AppState>,
    session_id: Uuid,
    form: SoilForm,
    request_id: Option<&str>,
) -> ApiResult<PageState> {
    let sample = form.to_sample()?;

    let ticket = state
        .sessions
        .update(session_id, |page| page.prediction.begin_submit(form))
        .ok_or_else(ApiError::session_not_found)?;

    if let Some(ticket) = ticket {
        let state = Arc::clone(state);
        let request_id = request_id.map(str::to_string);

        tokio::spawn(async move {
            let outcome = state
                .prediction_client
                .predict(&sample, request_id.as_deref())
                .await;
            if state
                .sessions
                .update(session_id, |page| page.prediction.finish_submit(ticket, outcome))
                .is_none()
            {
                debug!(%session_id, "Session gone before prediction arrived");
            }
        }
        .in_current_span())
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;
    }

    snapshot(state, session_id)
}

/// Generate the care guide for the current recommendation. Like
/// [`submit_sample`], the call outlives the request that started it.
#[instrument(skip(state))]
pub async fn request_guide(state: &Arc<AppState>, session_id: Uuid) -> ApiResult<PageState> {
    let ticket = state
        .sessions
        .update(session_id, |page| page.prediction.begin_guide())
        .ok_or_else(ApiError::session_not_found)?;

    match ticket {
        Some(ticket) => {
            let state = Arc::clone(state);

            tokio::spawn(async move {
                let guide = state.guide_client.care_guide(&build_prompt(&ticket.crop)).await;
                if state
                    .sessions
                    .update(session_id, |page| page.prediction.finish_guide(ticket, guide))
                    .is_none()
                {
                    debug!(%session_id, "Session gone before guide arrived");
                }
            }
            .in_current_span())
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        }
        None => debug!("No guide to request"),
    }

    snapshot(state, session_id)
}

/// Post a chat message. The reply arrives on a background task after the
/// configured delay; the returned snapshot shows the pending state.
#[instrument(skip(state, text))]
pub fn send_message(state: &Arc<AppState>, session_id: Uuid, text: &str) -> ApiResult<PageState> {
    let sent = state
        .sessions
        .update(session_id, |page| page.assistant.begin_send(text))
        .ok_or_else(ApiError::session_not_found)?;

    if let Some(message) = sent {
        let state = Arc::clone(state);
        let delay = Duration::from_millis(state.settings.assistant_reply_delay_ms);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = state.responder.classify(&message);
            if state
                .sessions
                .update(session_id, |page| page.assistant.finish_send(reply))
                .is_none()
            {
                debug!(%session_id, "Session gone before assistant reply");
            }
        });
    }

    snapshot(state, session_id)
}

/// Pre-fill the chat input with a suggested question.
pub fn suggest_question(
    state: &AppState,
    session_id: Uuid,
    question: &str,
) -> ApiResult<PageState> {
    state
        .sessions
        .update(session_id, |page| page.assistant.suggest(question))
        .ok_or_else(ApiError::session_not_found)?;

    snapshot(state, session_id)
}
