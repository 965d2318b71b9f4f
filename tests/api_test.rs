// Integration test: HTTP control API round trips

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use focus_loop::{
    api::create_router,
    state::{AppState, ManualClock, Preferences},
};
use serde_json::Value;
use tower::ServiceExt;

fn test_router() -> Router {
    let state = AppState::with_clock(
        20554,
        "127.0.0.1".to_string(),
        Preferences::default(),
        Arc::new(ManualClock::default()),
    );
    create_router(Arc::new(state))
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test(start_paused = true)]
async fn test_health() {
    let router = test_router();
    let (status, body) = call(&router, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test(start_paused = true)]
async fn test_status_before_any_command() {
    let router = test_router();
    let (status, body) = call(&router, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["session"]["state"], "idle");
    assert_eq!(body["session"]["formattedTime"], "00:00");
    assert_eq!(body["session"]["title"], "Ready");
    assert_eq!(body["preferences"]["focusMinutes"], 25);
    assert_eq!(body["lastAction"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn test_command_cycle() {
    let router = test_router();

    let (status, body) = call(&router, Method::POST, "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["session"]["state"], "focus");
    assert_eq!(body["session"]["remainingTime"], 1500.0);
    assert_eq!(body["session"]["isRunning"], true);
    assert_eq!(body["session"]["sessionCount"], 0);
    assert!(body["session"]["endDate"].is_string());

    let (_, body) = call(&router, Method::POST, "/skip").await;
    assert_eq!(body["session"]["state"], "shortBreak");
    assert_eq!(body["session"]["remainingTime"], 300.0);
    assert_eq!(body["session"]["sessionCount"], 1);
    assert_eq!(body["message"], "Skipped to Short Break");

    let (_, body) = call(&router, Method::POST, "/pause").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["session"]["endDate"], Value::Null);
    assert_eq!(body["session"]["title"], "Short Break 05:00 (paused)");

    let (_, body) = call(&router, Method::GET, "/status").await;
    assert_eq!(body["lastAction"], "pause");
    assert_eq!(body["session"]["state"], "shortBreak");

    let (_, body) = call(&router, Method::POST, "/reset").await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["session"]["sessionCount"], 0);
    assert_eq!(body["session"]["totalDuration"], 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_commands_require_post() {
    let router = test_router();
    let (status, _) = call(&router, Method::GET, "/start").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
