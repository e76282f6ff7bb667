use axum::{http::StatusCode, response::IntoResponse, Json};
use basket_core::{parse, Command};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParseCommandRequest {
    pub text: String,
}

/// A parsed utterance. Fields that don't apply to the action are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParsedCommandResponse {
    /// add, remove, modify, search or unknown
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl From<&Command> for ParsedCommandResponse {
    fn from(command: &Command) -> Self {
        let (qty, max_price) = match command {
            Command::Add { qty, .. } | Command::Modify { qty, .. } => (Some(*qty), None),
            Command::Search { max_price, .. } => (None, *max_price),
            Command::Remove { .. } | Command::Unknown => (None, None),
        };
        Self {
            action: command.action().to_string(),
            item: command.item().map(str::to_string),
            qty,
            max_price,
        }
    }
}

/// Parse without touching any session
#[utoipa::path(
    post,
    path = "/api/commands/parse",
    tag = "commands",
    request_body = ParseCommandRequest,
    responses(
        (status = 200, description = "Parsed command", body = ParsedCommandResponse)
    )
)]
pub async fn parse_command(Json(request): Json<ParseCommandRequest>) -> impl IntoResponse {
    let command = parse(&request.text);
    (StatusCode::OK, Json(ParsedCommandResponse::from(&command)))
}
