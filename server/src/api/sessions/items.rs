use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::apply_action;
use super::state::ActionResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddItemRequest {
    /// Suggestion or search result name; added with quantity 1
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    /// Text typed into the quantity field. Leading digits are used; anything
    /// else becomes 1.
    pub qty: String,
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/items",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added", body = ActionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| {
        Ok(Some(record.session.add_item(&request.name)))
    })
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/items/{index}",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "Zero-based list position")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity set", body = ActionResponse),
        (status = 404, description = "Session or entry not found", body = ErrorResponse)
    )
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<SetQuantityRequest>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| {
        record
            .session
            .set_quantity_from_input(index, &request.qty)
            .map(|_| None)
    })
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/items/{index}",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "Zero-based list position")
    ),
    responses(
        (status = 200, description = "Entry removed", body = ActionResponse),
        (status = 404, description = "Session or entry not found", body = ErrorResponse)
    )
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| record.session.remove_at(index).map(Some))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/items/{index}/increment",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "Zero-based list position")
    ),
    responses(
        (status = 200, description = "Quantity increased by one", body = ActionResponse),
        (status = 404, description = "Session or entry not found", body = ErrorResponse)
    )
)]
pub async fn increment_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| record.session.increment(index).map(Some))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/items/{index}/decrement",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "Zero-based list position")
    ),
    responses(
        (status = 200, description = "Quantity decreased by one, never below 1", body = ActionResponse),
        (status = 404, description = "Session or entry not found", body = ErrorResponse)
    )
)]
pub async fn decrement_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> impl IntoResponse {
    apply_action(&state, id, |record| record.session.decrement(index).map(Some))
}
