mod api;
mod store;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use basket_core::{AssistantConfig, Catalog, Dispatcher};
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::store::SessionStore;

pub const BIND_ADDR_VAR: &str = "BASKET_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Everything handlers share. Sessions are isolated inside the store; the
/// dispatcher (and with it the catalog) is read-only.
pub struct AppContext {
    pub sessions: SessionStore,
    pub dispatcher: Dispatcher,
    pub config: AssistantConfig,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/sessions", api::sessions::router())
        .nest("/api/commands", api::commands::router())
        .nest("/api/catalog", api::catalog::router())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump the document and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    init_telemetry();

    let config = AssistantConfig::from_env().context("Invalid environment configuration")?;
    let catalog =
        Catalog::load(config.catalog_path.as_deref()).context("Failed to load catalog")?;
    tracing::info!(products = catalog.len(), locale = %config.locale, "catalog ready");

    let state: AppState = Arc::new(AppContext {
        sessions: SessionStore::new(),
        dispatcher: Dispatcher::new(Arc::new(catalog)),
        config,
    });

    let bind_addr = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(AppContext {
            sessions: SessionStore::new(),
            dispatcher: Dispatcher::new(Arc::new(Catalog::embedded())),
            config: AssistantConfig::default(),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/sessions", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_voice_flow() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/speech", id),
            Some(json!({"events": [{"text": "add 2 apples", "is_final": true}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"]["text"], "Added 2 × apples.");
        assert_eq!(body["session"]["items"][0]["name"], "apples");
        assert_eq!(body["session"]["items"][0]["qty"], 2);
        assert_eq!(body["session"]["items"][0]["category"], "Produce");
        assert_eq!(body["session"]["suggestions"][0], "Apples");

        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/speech", id),
            Some(json!({"events": [{"text": "find toothpaste under 5", "is_final": true}]})),
        )
        .await;
        let results = body["session"]["search_results"].as_array().unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p["price"].as_f64().unwrap() <= 5.0));
    }

    #[tokio::test]
    async fn test_interim_speech_does_not_dispatch() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/speech", id),
            Some(json!({"events": [{"text": "add milk"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], Value::Null);
        assert_eq!(body["session"]["transcript"], "add milk");
        assert_eq!(body["session"]["items"], json!([]));
    }

    #[tokio::test]
    async fn test_speech_batch_is_one_utterance() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/speech", id),
            Some(json!({"events": [
                {"text": "add three", "is_final": true},
                {"text": "ban", "is_final": false},
                {"text": "bananas", "is_final": true}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"]["text"], "Added 3 × bananas.");
        assert_eq!(body["session"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["session"]["transcript"], "add three bananas");
    }

    #[tokio::test]
    async fn test_item_affordances() {
        let app = test_app();
        let id = new_session(&app).await;
        send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/items", id),
            Some(json!({"name": "Brown Bread"})),
        )
        .await;

        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/items/0/increment", id),
            None,
        )
        .await;
        assert_eq!(body["session"]["items"][0]["qty"], 2);

        let (_, body) = send(
            &app,
            Method::PUT,
            &format!("/api/sessions/{}/items/0", id),
            Some(json!({"qty": "7abc"})),
        )
        .await;
        assert_eq!(body["session"]["items"][0]["qty"], 7);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/items/5/decrement", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/sessions/{}/items/0", id),
            None,
        )
        .await;
        assert_eq!(body["status"]["text"], "Removed Brown Bread.");
        assert_eq!(body["session"]["items"], json!([]));
    }

    #[tokio::test]
    async fn test_listening_and_locale() {
        let app = test_app();
        let id = new_session(&app).await;

        let (_, body) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{}/listening", id),
            Some(json!({"listening": true})),
        )
        .await;
        assert_eq!(body["status"]["text"], "Listening...");
        assert_eq!(body["status"]["severity"], "ok");
        assert_eq!(body["session"]["listening"], true);

        let (_, body) = send(
            &app,
            Method::PUT,
            &format!("/api/sessions/{}/locale", id),
            Some(json!({"locale": "hi-IN"})),
        )
        .await;
        assert_eq!(body["session"]["locale"], "hi-IN");
        assert_eq!(body["session"]["listening"], false);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/sessions/{}/locale", id),
            Some(json!({"locale": "fr-FR"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_and_deleted_sessions() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, _) = send(&app, Method::DELETE, &format!("/api/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");
    }

    #[tokio::test]
    async fn test_stateless_endpoints() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/commands/parse",
            Some(json!({"text": "set milk to five"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"action": "modify", "item": "milk", "qty": 5}));

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/catalog/search?q=amul&max_price=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        for product in body.as_array().unwrap() {
            assert_eq!(product["brand"], "Amul");
            assert!(product["price"].as_f64().unwrap() <= 1.0);
        }
    }
}
