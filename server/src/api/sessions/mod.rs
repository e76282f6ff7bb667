pub mod create;
pub mod delete;
pub mod get;
pub mod items;
pub mod listening;
pub mod speech;
pub mod state;

use crate::api::error_response;
use crate::store::SessionRecord;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get as get_method, post, put};
use axum::Json;
use axum::Router;
use basket_core::{ListError, StatusMessage};
use utoipa::OpenApi;
use uuid::Uuid;

use self::state::{ActionResponse, SessionStateResponse};

/// Returns the router for /api/sessions endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_session))
        .route(
            "/{id}",
            get_method(get::get_session).delete(delete::delete_session),
        )
        .route("/{id}/speech", post(speech::post_speech))
        .route("/{id}/speech-error", post(speech::post_speech_error))
        .route("/{id}/listening", post(listening::set_listening))
        .route("/{id}/locale", put(listening::set_locale))
        .route("/{id}/items", post(items::add_item))
        .route(
            "/{id}/items/{index}",
            put(items::set_quantity).delete(items::remove_item),
        )
        .route("/{id}/items/{index}/increment", post(items::increment_item))
        .route("/{id}/items/{index}/decrement", post(items::decrement_item))
}

pub(crate) fn session_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Session not found")
}

/// Apply an action to one session and answer with its new state.
pub(crate) fn apply_action(
    state: &AppState,
    id: Uuid,
    action: impl FnOnce(&mut SessionRecord) -> Result<Option<StatusMessage>, ListError>,
) -> Response {
    let outcome = state.sessions.update(id, |record| {
        action(record).map(|status| ActionResponse {
            status: status.as_ref().map(Into::into),
            session: SessionStateResponse::new(id, record),
        })
    });

    match outcome {
        Some(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Some(Err(e)) => error_response(StatusCode::NOT_FOUND, e.to_string()),
        None => session_not_found(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_session,
        get::get_session,
        delete::delete_session,
        speech::post_speech,
        speech::post_speech_error,
        listening::set_listening,
        listening::set_locale,
        items::add_item,
        items::set_quantity,
        items::remove_item,
        items::increment_item,
        items::decrement_item,
    ),
    components(schemas(
        state::SessionStateResponse,
        state::ListEntryResponse,
        state::ActionResponse,
        create::CreateSessionRequest,
        speech::SpeechRequest,
        speech::SpeechEventRequest,
        speech::SpeechErrorRequest,
        listening::ListeningRequest,
        listening::LocaleRequest,
        items::AddItemRequest,
        items::SetQuantityRequest,
    ))
)]
pub struct ApiDoc;
