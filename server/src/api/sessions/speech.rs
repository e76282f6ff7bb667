use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use basket_core::SpeechEvent;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::apply_action;
use super::state::ActionResponse;

/// One recognizer result
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeechEventRequest {
    pub text: String,
    /// Interim results only update the transcript
    #[serde(default)]
    pub is_final: bool,
}

/// Results delivered together. Their final chunks are joined and
/// interpreted as one utterance.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeechRequest {
    pub events: Vec<SpeechEventRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeechErrorRequest {
    /// Recognizer error code, e.g. "not-allowed" or "network"
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/speech",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "Transcript updated; final text was interpreted", body = ActionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn post_speech(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SpeechRequest>,
) -> impl IntoResponse {
    let events: Vec<SpeechEvent> = request
        .events
        .into_iter()
        .map(|event| SpeechEvent {
            text: event.text,
            is_final: event.is_final,
        })
        .collect();
    let dispatcher = &state.dispatcher;
    apply_action(&state, id, |record| {
        Ok(dispatcher.handle_speech(&mut record.session, &events))
    })
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/speech-error",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SpeechErrorRequest,
    responses(
        (status = 200, description = "Error reported", body = ActionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn post_speech_error(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SpeechErrorRequest>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| {
        Ok(Some(record.session.speech_error(&request.error)))
    })
}
