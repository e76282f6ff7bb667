pub mod parse;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/commands endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/parse", post(parse::parse_command))
}

#[derive(OpenApi)]
#[openapi(
    paths(parse::parse_command),
    components(schemas(parse::ParseCommandRequest, parse::ParsedCommandResponse))
)]
pub struct ApiDoc;
