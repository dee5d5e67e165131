//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bowling_core::clock::Clock;
use bowling_core::error::DomainError;
use bowling_core::repository::EventRepository;
use bowling_event_store::in_memory_event_repository::InMemoryEventRepository;
use bowling_game::application::summarizer::{ScoreSheetSummarizer, Summarizer, SummaryRequest};
use bowling_test_support::FixedClock;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bowling_api::routes;
use bowling_api::state::AppState;

/// Summarizer that echoes the score it was given.
pub struct StubSummarizer;

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, DomainError> {
        Ok(format!(
            "stub summary: {} after {} roll(s)",
            request.score.current_score,
            request.rolls.len()
        ))
    }
}

/// Summarizer whose backing service is always down.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _request: &SummaryRequest) -> Result<String, DomainError> {
        Err(DomainError::ExternalService("connection refused".into()))
    }
}

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A fresh shared repository. Clone the `Arc` into several apps to simulate
/// successive requests against one server.
pub fn new_repository() -> Arc<InMemoryEventRepository> {
    Arc::new(InMemoryEventRepository::new())
}

/// Build the full app router over `repository` with the local score-sheet
/// summarizer.
pub fn build_test_app(repository: Arc<InMemoryEventRepository>) -> Router {
    build_test_app_with_summarizer(repository, Arc::new(ScoreSheetSummarizer))
}

/// Build the full app router with a custom summarizer.
pub fn build_test_app_with_summarizer(
    repository: Arc<InMemoryEventRepository>,
    summarizer: Arc<dyn Summarizer>,
) -> Router {
    let event_repository: Arc<dyn EventRepository> = repository;
    let app_state = AppState::new(fixed_clock(), event_repository, summarizer);

    routes::build_router().with_state(app_state)
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

/// Send a POST request with no body and return the response.
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

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Create a game and return its identifier.
pub async fn create_game(repository: &Arc<InMemoryEventRepository>) -> uuid::Uuid {
    let app = build_test_app(Arc::clone(repository));
    let (status, json) = post_empty(app, "/api/v1/games").await;
    assert_eq!(status, StatusCode::CREATED);
    json["game_id"].as_str().unwrap().parse().unwrap()
}

/// Record each roll in order, asserting every one is accepted.
pub async fn roll_all(repository: &Arc<InMemoryEventRepository>, game_id: uuid::Uuid, pins: &[i64]) {
    for &p in pins {
        let app = build_test_app(Arc::clone(repository));
        let (status, json) = post_json(
            app,
            &format!("/api/v1/games/{game_id}/rolls"),
            &serde_json::json!({ "pins": p }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "roll {p} rejected: {json}");
    }
}
