use crate::api::{error_response, ErrorResponse, ProductResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Matched case-insensitively against product name and brand
    pub q: String,
    /// Only products at or below this price
    pub max_price: Option<f64>,
}

/// Search the catalog without touching any session
#[utoipa::path(
    get,
    path = "/api/catalog/search",
    tag = "catalog",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching products in catalog order", body = Vec<ProductResponse>),
        (status = 400, description = "Invalid price ceiling", body = ErrorResponse)
    )
)]
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if params.max_price.is_some_and(|max| !max.is_finite() || max < 0.0) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "max_price must be a non-negative number",
        );
    }

    let results: Vec<ProductResponse> = state
        .dispatcher
        .search_engine()
        .search(&params.q, params.max_price)
        .iter()
        .map(Into::into)
        .collect();

    tracing::debug!(query = %params.q, results = results.len(), "catalog search");
    (StatusCode::OK, Json(results)).into_response()
}
