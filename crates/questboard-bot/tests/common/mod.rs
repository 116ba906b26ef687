//! Shared test helpers for host integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use questboard_board::domain::aggregates::QuestBoard;
use questboard_core::clock::Clock;
use questboard_persistence::manager::PersistenceManager;
use questboard_router::router::ActionRouter;
use questboard_session::application::session_store::SessionStore;
use questboard_test_support::{FixedClock, InMemorySnapshotStore, StaticAdminPolicy};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use questboard_bot::feedback::FeedbackLog;
use questboard_bot::outbox::OutboxNotifier;
use questboard_bot::routes;
use questboard_bot::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A running host without a socket: router, state and the directory holding
/// the feedback log.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemorySnapshotStore>,
    pub dir: tempfile::TempDir,
}

impl TestApp {
    /// The full router with the same route structure as `main.rs`.
    pub fn router(&self) -> Router {
        routes::router().with_state(self.state.clone())
    }
}

/// Builds a host over an empty board. `admin` decides whether every actor
/// passes the admin policy.
pub fn build_test_app(admin: bool) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(InMemorySnapshotStore::new());
    let engine = ActionRouter::new(
        QuestBoard::new(),
        SessionStore::new(None),
        Arc::new(StaticAdminPolicy(admin)),
        fixed_clock(),
    );
    let state = AppState::new(
        engine,
        Arc::new(OutboxNotifier::new(32)),
        PersistenceManager::new(store.clone()),
        FeedbackLog::new(dir.path().join("feedback.txt")),
        CancellationToken::new(),
    );
    TestApp { state, store, dir }
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

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Types `text` as user `id` and returns the reply object.
pub async fn say(app: &TestApp, id: i64, name: &str, text: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app.router(),
        "/api/v1/messages",
        &serde_json::json!({"actor": {"id": id, "name": name}, "text": text}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{text}: {body}");
    body
}

/// Presses the button carrying `data` as user `id`.
pub async fn press(app: &TestApp, id: i64, data: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app.router(),
        "/api/v1/callbacks",
        &serde_json::json!({"actor": {"id": id}, "data": data}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{data}: {body}");
    body
}

/// Drains user `id`'s outbox and returns the message texts.
pub async fn outbox_texts(app: &TestApp, id: i64) -> Vec<String> {
    let (status, body) = get_json(app.router(), &format!("/api/v1/outbox/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["text"].as_str().unwrap().to_owned())
        .collect()
}
