//! HTTP-level tests for the SEO content service.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`, with the
//! search API and the LLM replaced by stubs that count their calls.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use seo_content_service::testing::{
    StubGenerator, StubSearch, sample_document_json, sample_results,
};
use seo_content_service::{AppState, FAQ_COUNT, build_router};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    search: Arc<StubSearch>,
    generator: Arc<StubGenerator>,
}

fn setup_test_app(search: StubSearch, generator: StubGenerator) -> TestApp {
    let search = Arc::new(search);
    let generator = Arc::new(generator);
    let state = AppState::new(search.clone(), generator.clone());
    TestApp {
        router: build_router(state, "public"),
        search,
        generator,
    }
}

fn valid_reply() -> StubGenerator {
    StubGenerator::replying(sample_document_json(FAQ_COUNT).to_string())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-seo")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-seo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Page rendering
// ============================================================================

#[tokio::test]
async fn test_home_page_renders_empty_form() {
    let app = setup_test_app(StubSearch::empty(), valid_reply());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, html) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("action=\"/generate-seo\""));
    assert!(!html.contains("class=\"error\""));
    assert_eq!(app.search.calls(), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app(StubSearch::empty(), valid_reply());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let app = setup_test_app(StubSearch::empty(), valid_reply());

    let request = Request::builder()
        .uri("/styles.css")
        .body(Body::empty())
        .unwrap();
    let (status, css) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(css.contains(".seo-result"));
}

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let app = setup_test_app(StubSearch::empty(), valid_reply());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert!(response.headers().contains_key("x-correlation-id"));
}

// ============================================================================
// Keyword validation
// ============================================================================

#[tokio::test]
async fn test_missing_keyword_skips_all_outbound_calls() {
    let app = setup_test_app(StubSearch::returning(sample_results(3)), valid_reply());

    let (status, html) = send(app.router, form_post("")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Keyword is required"));
    assert_eq!(app.search.calls(), 0);
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn test_blank_keyword_is_rejected() {
    let app = setup_test_app(StubSearch::returning(sample_results(3)), valid_reply());

    let (_, html) = send(app.router, json_post(serde_json::json!({ "keyword": "   " }))).await;

    assert!(html.contains("Keyword is required"));
    assert_eq!(app.search.calls(), 0);
}

#[tokio::test]
async fn test_unreadable_body_counts_as_missing_keyword() {
    let app = setup_test_app(StubSearch::returning(sample_results(3)), valid_reply());

    let request = Request::builder()
        .method("POST")
        .uri("/generate-seo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, html) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Keyword is required"));
    assert_eq!(app.search.calls(), 0);
}

// ============================================================================
// Search failures
// ============================================================================

#[tokio::test]
async fn test_search_failure_renders_error_without_synthesis() {
    let app = setup_test_app(StubSearch::failing("quota exceeded"), valid_reply());

    let (status, html) = send(app.router, form_post("keyword=wireless+mouse")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Failed to fetch search results"));
    assert!(html.contains("could not be reached"));
    assert_eq!(app.search.calls(), 1);
    assert_eq!(app.generator.calls(), 0);
}

#[tokio::test]
async fn test_no_search_results_renders_error_without_synthesis() {
    let app = setup_test_app(StubSearch::empty(), valid_reply());

    let (_, html) = send(app.router, form_post("keyword=wireless+mouse")).await;

    assert!(html.contains("Failed to fetch search results"));
    assert!(html.contains("no results"));
    assert_eq!(app.generator.calls(), 0);
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_form_submission_renders_seo_package() {
    let app = setup_test_app(StubSearch::returning(sample_results(5)), valid_reply());

    let (status, html) = send(app.router, form_post("keyword=wireless+mouse")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("class=\"error\""));
    assert_eq!(html.matches("class=\"faq-item\"").count(), FAQ_COUNT);
    assert_eq!(app.search.queries(), vec!["wireless mouse"]);

    let (_, prompt) = app.generator.last_call().unwrap();
    assert!(prompt.contains("\"wireless mouse\""));
    assert!(prompt.contains("(3) Title: Result 3"));
    assert!(!prompt.contains("(4) Title"));
}

#[tokio::test]
async fn test_keyword_is_trimmed_before_search_and_prompt() {
    let app = setup_test_app(StubSearch::returning(sample_results(3)), valid_reply());

    let (_, html) = send(app.router, form_post("keyword=++wireless+mouse++")).await;

    assert!(html.contains("class=\"seo-result\""));
    assert_eq!(app.search.queries(), vec!["wireless mouse"]);
    let (_, prompt) = app.generator.last_call().unwrap();
    assert!(prompt.contains("\"wireless mouse\""));
    assert!(!prompt.contains("\" wireless mouse"));
}

#[tokio::test]
async fn test_json_submission_renders_seo_package() {
    let app = setup_test_app(StubSearch::returning(sample_results(2)), valid_reply());

    let (_, html) = send(
        app.router,
        json_post(serde_json::json!({ "keyword": "wireless mouse" })),
    )
    .await;

    assert!(html.contains("class=\"seo-result\""));
    assert_eq!(app.generator.calls(), 1);
}

#[tokio::test]
async fn test_invalid_model_output_renders_generation_error() {
    let app = setup_test_app(
        StubSearch::returning(sample_results(3)),
        StubGenerator::replying("I'm sorry, I can't produce JSON today."),
    );

    let (status, html) = send(app.router, form_post("keyword=wireless+mouse")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error generating SEO content"));
    assert!(!html.contains("class=\"seo-result\""));
}
