// HTTP front end: the single-page UI plus a JSON API
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::dispatch::{dispatch, AnalysisRequest, Outcome, Services};
use crate::present::html::{render_error_page, render_page};

#[derive(Clone)]
pub struct AppState {
    services: Arc<Services>,
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

/// Analysis failure rendered as the error page.
struct PageError(anyhow::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("analysis failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_error_page(&format!("{:#}", self.0))),
        )
            .into_response()
    }
}

/// Analysis failure rendered as JSON.
struct JsonError(anyhow::Error);

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        error!("analysis failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("{:#}", self.0),
            }),
        )
            .into_response()
    }
}

pub fn create_router(services: Services) -> Router {
    let state = AppState {
        services: Arc::new(services),
    };
    Router::new()
        .route("/", get(index).post(run_form))
        .route("/api/analyze", post(run_json))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, services: Services) -> anyhow::Result<()> {
    let app = create_router(services);
    let listener = TcpListener::bind(addr).await?;
    info!("NLPiffy listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn index() -> Html<String> {
    Html(render_page(&AnalysisRequest::default(), None))
}

async fn run_form(
    State(state): State<AppState>,
    Form(request): Form<AnalysisRequest>,
) -> Result<Html<String>, PageError> {
    let (request, outcome) = analyze(state, request).await.map_err(PageError)?;
    Ok(Html(render_page(&request, Some(&outcome))))
}

async fn run_json(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<Outcome>, JsonError> {
    let (_, outcome) = analyze(state, request).await.map_err(JsonError)?;
    Ok(Json(outcome))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// Analysis is CPU-bound, keep it off the async workers
async fn analyze(
    state: AppState,
    request: AnalysisRequest,
) -> anyhow::Result<(AnalysisRequest, Outcome)> {
    tokio::task::spawn_blocking(move || {
        let outcome = dispatch(&state.services, &request)?;
        Ok::<_, anyhow::Error>((request, outcome))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{EntityRecord, LanguageEngine, TokenRecord};
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Services::load(None).unwrap())
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Run Analysis"));
        assert!(body.contains("id=\"busy\""));
        assert!(body.contains("Processing your text..."));
    }

    #[tokio::test]
    async fn test_form_sentiment() {
        let response = app()
            .oneshot(form_request(
                "text=I+love+this%21+It+is+amazing+and+wonderful.&feature=sentiment",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Positive Sentiment"));
        assert!(body.contains("<div class=\"value\">0.700</div>"));
    }

    #[tokio::test]
    async fn test_form_blank_text_warns() {
        let response = app()
            .oneshot(form_request("text=+++&feature=ner"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Please enter some text to analyze!"));
        assert!(!body.contains("Total Entities Found"));
    }

    #[tokio::test]
    async fn test_json_entities() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"text": "Apple is looking at buying a U.K. startup for $1 billion.", "feature": "ner"}"#,
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["kind"], "entities");
        let entities = json["entities"].as_array().unwrap();
        assert_eq!(json["count"].as_u64().unwrap() as usize, entities.len());
        assert!(entities.iter().any(|e| e["label"] == "ORG"));
        assert!(entities.iter().any(|e| e["label"] == "MONEY"));
    }

    #[tokio::test]
    async fn test_json_rejects_unknown_feature() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "hi", "feature": "translate"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    struct BrokenEngine;

    impl LanguageEngine for BrokenEngine {
        fn tokens(&self, _: &str) -> anyhow::Result<Vec<TokenRecord>> {
            Err(anyhow::anyhow!("model not initialised"))
        }
        fn entities(&self, _: &str) -> anyhow::Result<Vec<EntityRecord>> {
            Err(anyhow::anyhow!("model not initialised"))
        }
    }

    #[tokio::test]
    async fn test_handler_failure_is_server_error() {
        let mut services = Services::load(None).unwrap();
        services.engine = Arc::new(BrokenEngine);
        let response = create_router(services)
            .oneshot(form_request("text=hello&feature=tokenize"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains("model not initialised"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
    }
}
