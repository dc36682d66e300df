//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use spiritfood_content::application::loader::{builtin_catalog, load_catalog_from_str};
use spiritfood_content::domain::catalog::QuizCatalog;
use spiritfood_enrichment::domain::port::EnrichmentPort;
use spiritfood_event_store::memory_event_repository::InMemoryEventRepository;
use spiritfood_test_support::{FixedClock, MINI_QUIZ_YAML};
use tower::ServiceExt;

use spiritfood_api::build_router;
use spiritfood_api::state::AppState;

/// State over `catalog` with a fresh in-memory event store and a fixed clock.
pub fn test_state(catalog: QuizCatalog) -> AppState {
    AppState::new(
        Arc::new(catalog),
        Arc::new(FixedClock::default()),
        Arc::new(InMemoryEventRepository::new()),
    )
}

/// State over the built-in quiz.
pub fn builtin_state() -> AppState {
    test_state(builtin_catalog().unwrap())
}

/// State over the three-scene test quiz.
pub fn mini_state() -> AppState {
    test_state(load_catalog_from_str(MINI_QUIZ_YAML).unwrap())
}

/// `state` with enrichment through `port`.
pub fn with_enrichment(state: AppState, port: Arc<dyn EnrichmentPort>) -> AppState {
    state.with_enrichment(port, Duration::from_millis(200))
}

/// The full router, as `main.rs` builds it.
pub fn build_test_app(state: AppState) -> Router {
    build_router(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Starts an attempt and returns its id.
pub async fn start_attempt(state: &AppState) -> String {
    let (status, json) = post_empty(build_test_app(state.clone()), "/api/v1/attempts").await;
    assert_eq!(status, StatusCode::CREATED);
    json["attempt_id"].as_str().unwrap().to_owned()
}

/// Selects `label` and returns the status and updated view.
pub async fn choose(
    state: &AppState,
    attempt_id: &str,
    label: &str,
) -> (StatusCode, serde_json::Value) {
    post_json(
        build_test_app(state.clone()),
        &format!("/api/v1/attempts/{attempt_id}/choices"),
        &serde_json::json!({ "label": label }),
    )
    .await
}
