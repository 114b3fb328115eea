use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{FromRequest, Request, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    middleware::{Next, from_fn},
    response::{Html, Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{Instrument, info, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    generator::{ContentGenerator, RigContentGenerator},
    models::GenerateSeoRequest,
    search::{GoogleSearchClient, SearchProvider},
    view::{PageView, render_page},
    workflow::SeoWorkflow,
};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub workflow: SeoWorkflow,
}

impl AppState {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            workflow: SeoWorkflow::new(search, generator),
        }
    }
}

pub fn create_app(config: &AppConfig) -> Router {
    let app_state = create_app_state(config);
    build_router(app_state, &config.static_dir)
}

fn create_app_state(config: &AppConfig) -> AppState {
    let search = GoogleSearchClient::new(&config.search_api_key, &config.search_engine_id)
        .with_base_url(&config.search_base_url);
    let generator = RigContentGenerator::new(&config.generation_api_key, &config.generation_model);

    AppState::new(Arc::new(search), Arc::new(generator))
}

pub fn build_router(app_state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/generate-seo", post(generate_seo))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state)
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value.clone());

        let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
        let mut response = next.run(request).instrument(span).await;
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        return response;
    }

    next.run(request).await
}

async fn root() -> Html<String> {
    Html(render_page(&PageView::empty()))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn generate_seo(
    State(state): State<AppState>,
    KeywordInput(request): KeywordInput,
) -> Html<String> {
    let Some(keyword) = request.keyword() else {
        warn!("Rejected request without a keyword");
        return Html(render_page(&PageView::missing_keyword()));
    };

    info!(keyword = %keyword, "Starting SEO content generation");
    let outcome = state.workflow.run(keyword).await;

    Html(render_page(&PageView::from_outcome(keyword, outcome)))
}

/// Request body of `POST /generate-seo`, read as JSON or as a urlencoded form
/// depending on the content type.
///
/// A body that cannot be read yields an empty request, which the handler
/// reports as a missing keyword.
pub struct KeywordInput(pub GenerateSeoRequest);

impl<S> FromRequest<S> for KeywordInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let parsed = if is_json {
            Json::<GenerateSeoRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.body_text())
        } else {
            Form::<GenerateSeoRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.body_text())
        };

        Ok(KeywordInput(parsed.unwrap_or_else(|reason| {
            warn!(reason = %reason, "Could not read request body");
            GenerateSeoRequest::default()
        })))
    }
}
