use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use basket_core::{Locale, Session};
use serde::Deserialize;
use utoipa::ToSchema;

use super::state::SessionStateResponse;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateSessionRequest {
    /// Recognizer locale (en-IN, en-US, hi-IN). Defaults to the server's locale.
    pub locale: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionStateResponse),
        (status = 400, description = "Unsupported locale", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let locale = match request.locale.as_deref().map(str::parse::<Locale>) {
        Some(Ok(locale)) => locale,
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        None => state.config.locale,
    };

    let id = state
        .sessions
        .create(Session::new(locale, state.config.seasonal.clone()));

    match state
        .sessions
        .view(id, |record| SessionStateResponse::new(id, record))
    {
        Some(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        None => super::session_not_found(),
    }
}
