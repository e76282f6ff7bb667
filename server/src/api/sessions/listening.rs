use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use basket_core::Locale;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::apply_action;
use super::state::ActionResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListeningRequest {
    pub listening: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocaleRequest {
    /// en-IN, en-US or hi-IN
    pub locale: String,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/listening",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = ListeningRequest,
    responses(
        (status = 200, description = "Listening state set", body = ActionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn set_listening(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ListeningRequest>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| {
        Ok(if request.listening {
            record.session.start_listening()
        } else {
            record.session.stop_listening()
        })
    })
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/locale",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = LocaleRequest,
    responses(
        (status = 200, description = "Locale changed", body = ActionResponse),
        (status = 400, description = "Unsupported locale", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn set_locale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LocaleRequest>,
) -> impl IntoResponse {
    let locale = match request.locale.parse::<Locale>() {
        Ok(locale) => locale,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    apply_action(&state, id, |record| Ok(record.session.set_locale(locale)))
}
