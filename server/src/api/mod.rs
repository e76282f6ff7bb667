pub mod catalog;
pub mod commands;
pub mod sessions;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use basket_core::{CatalogProduct, Severity, StatusMessage};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Status line shown to the speaker after an action
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    /// "ok" or "error"
    #[schema(value_type = String, example = "ok")]
    pub severity: Severity,
    pub text: String,
}

impl From<&StatusMessage> for StatusResponse {
    fn from(status: &StatusMessage) -> Self {
        Self {
            severity: status.severity,
            text: status.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub name: String,
    pub brand: String,
    pub price: f64,
}

impl From<&CatalogProduct> for ProductResponse {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
        }
    }
}

/// Generate the complete OpenAPI document by merging all module docs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Basket", description = "Voice-driven shopping list assistant"),
        components(schemas(ErrorResponse, StatusResponse, ProductResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        sessions::ApiDoc::openapi(),
        commands::ApiDoc::openapi(),
        catalog::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();
        for path in [
            "/api/sessions",
            "/api/sessions/{id}",
            "/api/sessions/{id}/speech",
            "/api/sessions/{id}/speech-error",
            "/api/sessions/{id}/listening",
            "/api/sessions/{id}/locale",
            "/api/sessions/{id}/items",
            "/api/sessions/{id}/items/{index}",
            "/api/sessions/{id}/items/{index}/increment",
            "/api/sessions/{id}/items/{index}/decrement",
            "/api/commands/parse",
            "/api/catalog/search",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_status_response_severity() {
        let ok = StatusResponse::from(&StatusMessage::ok("Stopped."));
        assert_eq!(ok.severity, Severity::Ok);
        let err = StatusResponse::from(&StatusMessage::error("Voice error: network"));
        assert_eq!(err.severity, Severity::Error);
        assert_eq!(err.text, "Voice error: network");
    }
}
