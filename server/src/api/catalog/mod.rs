pub mod search;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/catalog endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search::search_catalog))
}

#[derive(OpenApi)]
#[openapi(paths(search::search_catalog))]
pub struct ApiDoc;
